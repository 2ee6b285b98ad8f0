//! Demo entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting SwipeDeck demo");

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "native")]
fn run() -> swipedeck_demo::DemoResult<()> {
    use std::path::PathBuf;
    use swipedeck_core::DeckConfig;
    use swipedeck_demo::{DemoError, Session, load_cards, load_config, load_script};

    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let (cards_path, script_path) = match args.as_slice() {
        [cards, script, ..] => (cards, script),
        _ => {
            return Err(DemoError::Usage(
                "swipedeck-demo <cards.json> <script.json> [config.json]".to_string(),
            ));
        }
    };

    let config = match args.get(2) {
        Some(path) => load_config(path)?,
        None => DeckConfig::default(),
    };
    let cards = load_cards(cards_path)?;
    let script = load_script(script_path)?;
    log::info!(
        "Loaded {} cards and {} steps (viewport width {})",
        cards.len(),
        script.steps.len(),
        config.viewport_width
    );

    let mut session = Session::new(cards, config)?;
    session.run(&script);

    for line in session.transcript() {
        println!("{}", line);
    }
    println!("--");
    for line in session.render() {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
