use std::error::Error;
use std::fs::File;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};

use c64term::config::{CliArgs, Config};
use c64term::display::TermDisplay;
use c64term::input::StdinInput;
use c64term::machine::MemoryMachine;
use c64term::session::Session;
use clap::Parser;
use nix::sys::signal::{self, SigHandler, Signal};

/// set from the signal handler, polled once per frame
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

extern "C" fn request_shutdown(_: nix::libc::c_int) {
    SHUTDOWN.store(true, Ordering::SeqCst);
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // help and version go to stdout and are not errors
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    // stderr shares the screen, so logging is off unless it has a file to go to
    match &args.log_file {
        Some(path) => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(File::create(path)?)))
            .init(),
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init(),
    }

    for sig in [Signal::SIGINT, Signal::SIGTERM] {
        // the handler only stores to an atomic
        unsafe { signal::signal(sig, SigHandler::Handler(request_shutdown)) }?;
    }

    let config = Config::from(&args);
    log::debug!("{:?}", config);

    // initialise
    // TODO: pick a chip backend at runtime once one implements Machine; the
    // memory-only machine shows the power-on screen and nothing more
    let machine = MemoryMachine::booted();
    let mut display = TermDisplay::new()?;
    let mut input = StdinInput::new()?;
    let mut session = Session::new(machine, config);

    session.run(&mut input, display.backend_mut(), &SHUTDOWN);

    log::debug!("exiting");
    Ok(())
}
