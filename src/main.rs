use std::io::{self, Write};
use std::sync::mpsc::channel;
use std::thread;

fn main() -> io::Result<()> {
    // stdout carries the protocol, so logs go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();
    chess_core::init();

    let (tx, rx) = channel::<String>();
    let printer = thread::spawn(move || -> io::Result<()> {
        let stdout = io::stdout();
        for line in rx {
            let mut out = stdout.lock();
            writeln!(out, "{}", line)?;
            out.flush()?;
        }
        Ok(())
    });

    chess_core::uci::run(io::stdin().lock(), tx)?;

    match printer.join() {
        Ok(result) => result,
        Err(_) => Err(io::Error::other("output thread panicked")),
    }
}
