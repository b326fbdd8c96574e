use crate::config::Config;
use crate::display::DiffRenderer;
use crate::font::Charset;
use crate::input::{self, Command, Input};
use crate::machine::Machine;
use crate::prg;
use crate::ready;
use crate::scanline::ScanlineExecutor;
use crate::screen::CellGrid;
use crate::timing::FrameClock;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tui::backend::Backend;

/// feedback typed into the machine after the load and save keys
const LOAD_OK: char = 'l';
const SAVE_OK: char = 's';
const FAILED: char = 'e';

/// what BASIC is told once it is ready, after the program is loaded
const RUN_COMMAND: &str = "run\r";

/// load-and-run of the program given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoRun {
    Disabled,
    /// waiting for the BASIC prompt
    Pending,
    Done,
}

/// The running front end: owns the machine and both cell grids, and drives
/// them one frame at a time.
pub struct Session<M: Machine> {
    machine: M,
    config: Config,
    executor: ScanlineExecutor,
    current: CellGrid,
    renderer: DiffRenderer,
    charset: Charset,
    autorun: AutoRun,
    keys: VecDeque<u8>,
}

impl<M: Machine> Session<M> {
    pub fn new(machine: M, config: Config) -> Session<M> {
        let current = CellGrid::default();
        let renderer = DiffRenderer::new(current.width(), current.height(), config.wide);
        let autorun = if config.autorun {
            AutoRun::Pending
        } else {
            AutoRun::Disabled
        };
        Session {
            machine,
            config,
            executor: ScanlineExecutor::new(),
            current,
            renderer,
            charset: Charset::default(),
            autorun,
            keys: VecDeque::new(),
        }
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }

    pub fn grid(&self) -> &CellGrid {
        &self.current
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn autorun(&self) -> AutoRun {
        self.autorun
    }

    /// keys waiting to be typed into the machine
    pub fn queued_keys(&self) -> usize {
        self.keys.len()
    }

    /// run frames, paced to the machine's frame rate, until `shutdown` is
    /// set. the flag is only looked at between frames
    pub fn run<I: Input, B: Backend>(&mut self, input: &mut I, backend: &mut B, shutdown: &AtomicBool) {
        let mut clock = FrameClock::start(Instant::now());
        log::debug!("starting frame loop");
        while !shutdown.load(Ordering::SeqCst) {
            self.step(input, backend, shutdown);
            if let Some(wait) = clock.pace(Instant::now()) {
                spin_sleep::sleep(wait);
            }
        }
        log::debug!("frame loop stopped after {} frames", clock.frames());
    }

    /// one frame: emulate and composite, maybe start the program, handle one
    /// terminal event, type one key, bring the terminal up to date. returns
    /// the number of cells drawn
    pub fn step<I: Input, B: Backend>(&mut self, input: &mut I, backend: &mut B, shutdown: &AtomicBool) -> usize {
        self.executor
            .run_frame(&mut self.machine, &mut self.current, self.charset);
        self.check_autorun();
        match input.poll_event() {
            Ok(Some(event)) => {
                if let Some(command) = input::map_event(&event) {
                    self.handle(command, backend, shutdown);
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("reading input: {}", e),
        }
        self.type_next_key();
        self.present(backend)
    }

    fn handle<B: Backend>(&mut self, command: Command, backend: &mut B, shutdown: &AtomicBool) {
        match command {
            Command::Key(key) => self.keys.push_back(key),
            Command::Load => {
                let ok = self.load_program();
                self.type_text(if ok { LOAD_OK } else { FAILED });
            }
            Command::Save => {
                let ok = match prg::save_file(&self.machine, &self.config.program) {
                    Ok(_) => true,
                    Err(e) => {
                        log::warn!("saving {}: {}", self.config.program.display(), e);
                        false
                    }
                };
                self.type_text(if ok { SAVE_OK } else { FAILED });
            }
            Command::ToggleCharset => {
                self.charset = self.charset.toggled();
                log::debug!("charset {:?}", self.charset);
            }
            Command::Redraw => {
                if let Err(e) = backend.clear() {
                    log::warn!("clearing terminal: {}", e);
                }
                self.renderer.force_redraw();
            }
            Command::Quit => shutdown.store(true, Ordering::SeqCst),
        }
    }

    fn check_autorun(&mut self) {
        if self.autorun != AutoRun::Pending || !ready::is_ready(&self.machine) {
            return;
        }
        self.autorun = AutoRun::Done;
        if self.load_program() {
            log::info!("running {}", self.config.program.display());
            for c in RUN_COMMAND.chars() {
                self.type_text(c);
            }
        } else {
            self.type_text(FAILED);
        }
    }

    fn load_program(&mut self) -> bool {
        match prg::load_file(&mut self.machine, &self.config.program) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("loading {}: {}", self.config.program.display(), e);
                false
            }
        }
    }

    fn type_text(&mut self, c: char) {
        if let Some(key) = input::fold_printable(c) {
            self.keys.push_back(key);
        }
    }

    // one key per frame, so the machine's keyboard scan sees each of them
    fn type_next_key(&mut self) {
        if let Some(key) = self.keys.pop_front() {
            self.machine.key_down(key);
            self.machine.key_up(key);
        }
    }

    fn present<B: Backend>(&mut self, backend: &mut B) -> usize {
        let drawn = match self.renderer.render(&self.current, backend) {
            Ok(drawn) => drawn,
            Err(e) => {
                log::warn!("drawing: {}", e);
                return 0;
            }
        };
        if let Err(e) = backend.flush() {
            log::warn!("flushing terminal: {}", e);
            self.renderer.force_redraw();
        }
        drawn
    }
}
