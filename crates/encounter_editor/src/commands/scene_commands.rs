//! Background, grid and window commands.

use std::path::PathBuf;

use super::{CommandError, Edit};
use crate::core::Encounter;

impl Encounter {
    /// Swap the backdrop image.
    ///
    /// `native_size` is the pixel size of the new image, as reported by the
    /// image library.
    pub fn change_background(&mut self, image: impl Into<PathBuf>, native_size: [u32; 2]) -> bool {
        let image = image.into();
        self.run("change_background", |scene| {
            let previous = Edit::SetBackgroundImage {
                image: scene.background.image.clone(),
                native_size: scene.background.native_size,
            };
            Ok((Edit::SetBackgroundImage { image, native_size }, previous))
        })
    }

    /// One more cell along the short side: smaller cells.
    pub fn reduce_grid(&mut self) -> bool {
        self.run("reduce_grid", |scene| {
            let units = scene.min_units();
            let reduced = units.checked_add(1).ok_or(CommandError::GridLimit(units))?;
            Ok((Edit::SetGrid(reduced), Edit::SetGrid(units)))
        })
    }

    /// One less cell along the short side: larger cells.
    pub fn enlarge_grid(&mut self) -> bool {
        self.run("enlarge_grid", |scene| {
            let units = scene.min_units();
            if units <= 1 {
                return Err(CommandError::GridLimit(units));
            }
            Ok((Edit::SetGrid(units - 1), Edit::SetGrid(units)))
        })
    }

    /// Scale the backdrop up by `factor`, which must exceed one.
    pub fn enlarge_window(&mut self, factor: f64) -> bool {
        self.run("enlarge_window", |scene| {
            if !(factor > 1.0 && factor.is_finite()) {
                return Err(CommandError::FactorOutOfRange {
                    factor,
                    expected: "greater than 1",
                });
            }
            let scale = scene.background.scale;
            Ok((Edit::SetScale(scale * factor), Edit::SetScale(scale)))
        })
    }

    /// Scale the backdrop down by `factor`, which must be below one.
    pub fn shrink_window(&mut self, factor: f64) -> bool {
        self.run("shrink_window", |scene| {
            if !(factor > 0.0 && factor < 1.0) {
                return Err(CommandError::FactorOutOfRange {
                    factor,
                    expected: "between 0 and 1",
                });
            }
            let scale = scene.background.scale;
            Ok((Edit::SetScale(scale * factor), Edit::SetScale(scale)))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Background, Encounter};

    fn encounter() -> Encounter {
        Encounter::new(Background::new("map.png", [800, 600]), 6)
    }

    #[test]
    fn test_grid_steps_and_undo() {
        let mut enc = encounter();
        assert!(enc.reduce_grid());
        assert_eq!(enc.min_units(), 7);
        assert!(enc.enlarge_grid());
        assert!(enc.enlarge_grid());
        assert_eq!(enc.min_units(), 5);
        enc.undo();
        enc.undo();
        enc.undo();
        assert_eq!(enc.min_units(), 6);
    }

    #[test]
    fn test_enlarge_grid_stops_at_one() {
        let mut enc = Encounter::new(Background::new("map.png", [800, 600]), 1);
        assert!(!enc.enlarge_grid());
        assert_eq!(enc.min_units(), 1);
        assert_eq!(enc.undoable_count(), 0);
    }

    #[test]
    fn test_reduce_grid_stops_at_max() {
        let mut enc = Encounter::new(Background::new("map.png", [800, 600]), u32::MAX);
        assert!(!enc.reduce_grid());
        assert_eq!(enc.min_units(), u32::MAX);
        assert_eq!(enc.undoable_count(), 0);
        assert!(enc.enlarge_grid());
        assert!(enc.reduce_grid());
        assert_eq!(enc.min_units(), u32::MAX);
    }

    #[test]
    fn test_window_factor_guards() {
        let mut enc = encounter();
        assert!(!enc.enlarge_window(0.5));
        assert!(!enc.enlarge_window(1.0));
        assert!(!enc.shrink_window(1.15));
        assert!(!enc.shrink_window(0.0));
        assert_eq!(enc.undoable_count(), 0);
        assert_eq!(enc.scene().background.scale, 1.0);
    }

    #[test]
    fn test_window_scale_is_restored_exactly() {
        let mut enc = encounter();
        assert!(enc.enlarge_window(1.15));
        assert!(enc.shrink_window(0.85));
        assert!(enc.shrink_window(0.85));
        assert_eq!(enc.window_size(), [664, 498]);
        enc.undo();
        enc.undo();
        enc.undo();
        assert_eq!(enc.scene().background.scale, 1.0);
        assert_eq!(enc.window_size(), [800, 600]);
    }

    #[test]
    fn test_change_background_round_trip() {
        let mut enc = encounter();
        assert!(enc.change_background("cave.jpg", [1024, 512]));
        assert_eq!(enc.window_size(), [1024, 512]);
        assert!(enc.undo());
        assert_eq!(enc.scene().background.image.to_str(), Some("map.png"));
        assert_eq!(enc.window_size(), [800, 600]);
    }
}
