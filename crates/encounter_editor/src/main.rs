//! Encounter Manager
//!
//! Headless driver: opens an encounter document or a background image,
//! feeds it input events read as text lines (see `input::parse_script`) and
//! saves the result.
//!
//! ```text
//! encounter-manager <encounter.json | image> [--script FILE] [--out FILE] [--prefs FILE]
//! ```
//!
//! Events are read from stdin when no script is given. The data directory
//! can be overridden with `ENCOUNTER_MANAGER_DATA`.

use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use encounter_editor::{
    input::{parse_line, KeyBindings, Session},
    scene::{DocumentStore, ImageDirectory, JsonFileStore},
    EditorPreferences, Encounter, LogRenderer, Renderer,
};

const USAGE: &str =
    "usage: encounter-manager <encounter.json | image> [--script FILE] [--out FILE] [--prefs FILE]";

#[derive(Debug, Default)]
struct Options {
    input: PathBuf,
    script: Option<PathBuf>,
    out: Option<PathBuf>,
    prefs: Option<PathBuf>,
}

impl Options {
    fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut options = Options::default();
        let mut input = None;
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let slot = match arg.as_str() {
                "--script" => &mut options.script,
                "--out" => &mut options.out,
                "--prefs" => &mut options.prefs,
                flag if flag.starts_with("--") => return Err(format!("unknown flag {}", flag)),
                _ => {
                    if input.replace(PathBuf::from(&arg)).is_some() {
                        return Err(format!("unexpected argument {}", arg));
                    }
                    continue;
                }
            };
            let value = args.next().ok_or_else(|| format!("{} needs a value", arg))?;
            *slot = Some(PathBuf::from(value));
        }
        options.input = input.ok_or_else(|| "missing encounter or image path".to_string())?;
        Ok(options)
    }
}

fn load_preferences(path: Option<PathBuf>) -> EditorPreferences {
    let mut prefs = match path.or_else(EditorPreferences::default_path) {
        Some(path) => EditorPreferences::load_or_default(&path).unwrap_or_else(|e| {
            log::warn!("Failed to load preferences from {:?}: {}", path, e);
            EditorPreferences::default()
        }),
        None => EditorPreferences::default(),
    };

    if let Ok(dir) = std::env::var("ENCOUNTER_MANAGER_DATA") {
        if !dir.is_empty() {
            prefs.data_dir = PathBuf::from(dir);
            log::info!("Data directory from env: {:?}", prefs.data_dir);
        }
    }
    prefs
}

fn run(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let prefs = load_preferences(options.prefs);
    let images = ImageDirectory::new(&prefs.data_dir);
    if let Err(e) = images.ensure_layout() {
        log::warn!("Cannot create data directory {:?}: {}", images.root(), e);
    }

    // Open a document, or start a fresh encounter over an image
    let (encounter, store, from_image) = if JsonFileStore::is_document(&options.input) {
        let store = JsonFileStore::new(&options.input);
        let encounter = Encounter::from_document(store.load()?, &images)?;
        (encounter, store, false)
    } else {
        let encounter = Encounter::from_image(&options.input, &images, prefs.default_min_units)?;
        let store = JsonFileStore::for_image(&prefs.encounter_dir(), &options.input);
        (encounter, store, true)
    };
    let store = match options.out {
        Some(out) => JsonFileStore::new(out),
        None => store,
    };

    let bindings = KeyBindings::with_overrides(&prefs.key_bindings).unwrap_or_else(|e| {
        log::warn!("Ignoring key binding overrides: {}", e);
        KeyBindings::default()
    });
    let mut session = Session::new(
        encounter.with_history_limit(prefs.history_limit),
        Box::new(images.clone()),
    )
    .with_preferences(&prefs)
    .with_bindings(bindings);

    let mut renderer = LogRenderer::new();
    renderer.render(&session.frame());

    let reader: Box<dyn BufRead> = match &options.script {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
        None => Box::new(std::io::stdin().lock()),
    };
    for (index, line) in reader.lines().enumerate() {
        let event = match parse_line(&line?) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(message) => {
                log::warn!("Line {}: {}", index + 1, message);
                continue;
            }
        };
        if session.handle(&event) {
            renderer.render(&session.frame());
        }
        if !session.is_running() {
            break;
        }
    }
    log::info!("Session ended after {} frames", renderer.frames());

    let mut encounter = session.into_encounter();
    if encounter.is_modified() || from_image {
        store.save(&encounter.to_document())?;
        encounter.mark_saved();
    } else {
        log::info!("No changes to save");
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("{} v{}", encounter_editor::NAME, encounter_editor::VERSION);

    let options = match Options::from_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(options) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
