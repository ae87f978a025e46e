use fourline_arena::{init_logging, LogFormat};

fn main() {
    let format = match std::env::var("FOURLINE_LOG_FORMAT").as_deref() {
        Ok("json") => LogFormat::Json,
        _ => LogFormat::Text,
    };
    if let Err(e) = init_logging(format) {
        eprintln!("WARNING: {}", e);
    }

    let code = fourline_cli::run(
        std::env::args(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    std::process::exit(code);
}
