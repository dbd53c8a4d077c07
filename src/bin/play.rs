use furrow_core::{Key, Renderer, Session, SessionConfig, TextRenderer};

fn main() {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let repl_mode = if let Some(pos) = args.iter().position(|arg| arg == "--repl") {
        args.remove(pos);
        true
    } else {
        false
    };

    let config = match config_from_args(&mut args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    };

    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("invalid level layout: {}", err);
            std::process::exit(1);
        }
    };

    // Execute all remaining tokens as keys/commands.
    for arg in &args {
        apply_token(&mut session, arg);
    }

    if repl_mode {
        run_repl(&mut session);
    } else {
        print_state(&session);
    }
}

/// Consume an optional `--config <path>` pair from the argument list.
fn config_from_args(args: &mut Vec<String>) -> Result<SessionConfig, String> {
    let Some(pos) = args.iter().position(|arg| arg == "--config") else {
        return Ok(SessionConfig::default());
    };
    if pos + 1 >= args.len() {
        return Err("--config requires a file path".to_string());
    }
    let path = args.remove(pos + 1);
    args.remove(pos);

    let text = std::fs::read_to_string(&path)
        .map_err(|err| format!("cannot read {}: {}", path, err))?;
    SessionConfig::from_toml_str(&text).map_err(|err| format!("bad config {}: {}", path, err))
}

fn run_repl(session: &mut Session) {
    println!("Furrow headless REPL");
    println!("Keys: w a s d space left right esc enter");
    println!("Commands: tick, state, help, q");

    let mut line = String::new();
    loop {
        line.clear();
        if std::io::stdin().read_line(&mut line).is_err() {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            print_state(session);
            continue;
        }
        if trimmed == "q" || trimmed == "quit" {
            break;
        }
        if trimmed == "help" {
            println!("Keys: w a s d space left right esc enter");
            println!("Commands: tick, state, help, q");
            continue;
        }

        for token in trimmed.split_whitespace() {
            apply_token(session, token);
        }
        print_state(session);
    }
}

fn apply_token(session: &mut Session, token: &str) {
    match token {
        "tick" => {
            for event in session.tick() {
                println!("event: {:?}", event);
            }
        }
        "state" => print_state(session),
        _ => match Key::from_name(token) {
            Some(key) => {
                for event in session.handle_key(key) {
                    println!("event: {:?}", event);
                }
            }
            None => println!("Unknown token: {}", token),
        },
    }
}

fn print_state(session: &Session) {
    let renderer = TextRenderer::new();
    // TextRenderer's error type is Infallible.
    let output = renderer.render(&session.get_state()).unwrap();
    println!("{}", output);
}
