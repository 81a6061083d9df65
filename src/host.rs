// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Drives a [CPU] in real time, on behalf of a [Frontend]
//!
//! Each frame, the [Host]:
//! 1. polls the [Frontend] for input
//! 2. runs [Host::ipf] instructions
//! 3. ticks the timers once
//! 4. turns the [Frontend]'s sound on or off to follow the sound timer
//! 5. renders

use crate::{
    error::{Error, Result},
    CPU,
};
use std::time::{Duration, Instant};

/// Instructions per frame, when unspecified
pub const DEFAULT_IPF: usize = 10;
/// Frames per second, when unspecified. The timers count down once per frame.
pub const DEFAULT_FRAME_RATE: u64 = 60;

/// The window (or terminal, or test harness) a [Host] runs the [CPU] in
pub trait Frontend {
    /// Delivers input to the [CPU]. Returns `false` once the frontend has been closed.
    fn poll(&mut self, cpu: &mut CPU) -> Result<bool>;
    /// Presents the [CPU]'s screen. Returns `false` once the frontend has been closed.
    fn render(&mut self, cpu: &CPU) -> Result<bool>;
    /// Starts or stops the buzzer
    fn sound(&mut self, _on: bool) {}
}

/// Runs a [CPU] at a fixed frame rate
#[derive(Debug)]
pub struct Host<F: Frontend> {
    /// The interpreter
    pub cpu: CPU,
    /// The frontend
    pub frontend: F,
    /// Instructions per frame
    pub ipf: usize,
    /// Frames per second, never zero
    rate: u64,
    beeping: bool,
    ft: Instant,
}

impl<F: Frontend> Host<F> {
    /// Creates a new [Host] at [DEFAULT_IPF] and [DEFAULT_FRAME_RATE]
    pub fn new(cpu: CPU, frontend: F) -> Self {
        Host {
            cpu,
            frontend,
            ipf: DEFAULT_IPF,
            rate: DEFAULT_FRAME_RATE,
            beeping: false,
            ft: Instant::now(),
        }
    }

    /// Sets the number of instructions per frame
    pub fn ipf(mut self, ipf: usize) -> Self {
        self.ipf = ipf;
        self
    }

    /// Sets the target frame rate. Zero is treated as one.
    pub fn frame_rate(mut self, rate: u64) -> Self {
        self.rate = rate.max(1);
        self
    }

    /// Gets the target frame rate
    pub fn rate(&self) -> u64 {
        self.rate
    }

    /// Runs a single frame, without waiting for it.
    ///
    /// Returns `false` if the frontend was closed.
    /// A [Error::BreakpointHit] is reported and otherwise ignored; any other error is returned.
    pub fn frame(&mut self) -> Result<bool> {
        if !self.frontend.poll(&mut self.cpu)? {
            return Ok(false);
        }
        match self.cpu.multistep(self.ipf) {
            Err(Error::BreakpointHit { addr, next }) => {
                log::info!("breakpoint hit: {addr:03x} ({next:04x})");
            }
            Err(e) => return Err(e),
            Ok(_) => (),
        }
        if !self.cpu.flags.pause {
            self.cpu.tick_timers();
        }
        let beeping = self.cpu.timers().is_beeping();
        if beeping != self.beeping {
            self.beeping = beeping;
            self.frontend.sound(beeping);
        }
        self.frontend.render(&self.cpu)
    }

    /// Sleeps until the next frame is due
    pub fn wait_for_next_frame(&mut self) {
        let rate = Duration::from_nanos(1_000_000_000 / self.rate + 1);
        std::thread::sleep(rate.saturating_sub(self.ft.elapsed()));
        self.ft += rate;
    }

    /// Runs frames until the frontend is closed, or the [CPU] hits a fatal error
    pub fn run(&mut self) -> Result<()> {
        self.ft = Instant::now();
        for result in self.by_ref() {
            result?;
        }
        Ok(())
    }
}

impl<F: Frontend> Iterator for Host<F> {
    type Item = Result<()>;

    /// Waits for, then runs, the next frame
    fn next(&mut self) -> Option<Self::Item> {
        self.wait_for_next_frame();
        match self.frame() {
            Ok(true) => Some(Ok(())),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stays open for `frames` frames, and records everything the host asks of it
    #[derive(Debug, Default)]
    struct Mock {
        frames: usize,
        polled: usize,
        rendered: usize,
        sounds: Vec<bool>,
        press: Option<(usize, usize)>,
    }

    impl Mock {
        fn new(frames: usize) -> Self {
            Mock {
                frames,
                ..Default::default()
            }
        }
    }

    impl Frontend for Mock {
        fn poll(&mut self, cpu: &mut CPU) -> Result<bool> {
            if self.polled == self.frames {
                return Ok(false);
            }
            if let Some((frame, key)) = self.press {
                if frame == self.polled {
                    cpu.press(key)?;
                }
            }
            self.polled += 1;
            Ok(true)
        }
        fn render(&mut self, _cpu: &CPU) -> Result<bool> {
            self.rendered += 1;
            Ok(true)
        }
        fn sound(&mut self, on: bool) {
            self.sounds.push(on)
        }
    }

    fn host(program: &[u8], frontend: Mock) -> Host<Mock> {
        let mut cpu = CPU::default();
        cpu.load_program_bytes(program)
            .expect("program should fit in memory");
        Host::new(cpu, frontend).frame_rate(1000)
    }

    #[test]
    fn frame_rate_is_never_zero() {
        let mut host = host(&[0x12, 0x00], Mock::new(1)).frame_rate(0);
        assert_eq!(1, host.rate());
        assert_eq!(DEFAULT_FRAME_RATE, Host::new(CPU::default(), Mock::new(0)).rate());
        // would divide by zero if the rate were 0
        if let Some(past) = Instant::now().checked_sub(Duration::from_secs(2)) {
            host.ft = past;
        }
        host.wait_for_next_frame();
    }

    #[test]
    fn runs_ipf_instructions_per_frame() {
        // jp 200
        let mut host = host(&[0x12, 0x00], Mock::new(3)).ipf(7);
        host.run().unwrap();
        assert_eq!(21, host.cpu.cycle());
        assert_eq!(3, host.frontend.rendered);
    }

    #[test]
    fn timers_tick_once_per_frame() {
        // ld v0, 5; ld dt, v0; jp 204
        let mut host = host(&[0x60, 0x05, 0xf0, 0x15, 0x12, 0x04], Mock::new(100));
        assert!(host.frame().unwrap());
        assert_eq!(4, host.cpu.delay());
        for _ in 0..4 {
            assert!(host.frame().unwrap());
        }
        assert_eq!(0, host.cpu.delay());
        assert!(host.frame().unwrap());
        assert_eq!(0, host.cpu.delay());
    }

    #[test]
    fn sound_follows_sound_timer() {
        // ld v0, 3; ld st, v0; jp 204
        let mut host = host(&[0x60, 0x03, 0xf0, 0x18, 0x12, 0x04], Mock::new(5));
        host.run().unwrap();
        assert_eq!(vec![true, false], host.frontend.sounds);
    }

    #[test]
    fn stops_when_closed() {
        let mut host = host(&[0x12, 0x00], Mock::new(0));
        host.run().unwrap();
        assert_eq!(0, host.frontend.rendered);
        assert_eq!(0, host.cpu.cycle());
    }

    #[test]
    fn stops_on_fatal_error() {
        let mut host = host(&[0xff, 0xff], Mock::new(10));
        match host.run() {
            Err(Error::UnimplementedInstruction {
                word: 0xffff,
                pc: 0x200,
            }) => {}
            other => panic!("{other:?}"),
        }
        assert_eq!(1, host.frontend.polled);
    }

    #[test]
    fn breakpoint_pauses_without_stopping() {
        // cls; jp 202
        let mut host = host(&[0x00, 0xe0, 0x12, 0x02], Mock::new(3));
        host.cpu.set_break(0x202);
        host.run().unwrap();
        assert!(host.cpu.flags.pause);
        assert_eq!(1, host.cpu.cycle());
        assert_eq!(3, host.frontend.rendered);
    }

    #[test]
    fn key_wait_keeps_frames_coming() {
        // ld v3, K; jp 202
        let mut frontend = Mock::new(4);
        frontend.press = Some((2, 0xb));
        let mut host = host(&[0xf3, 0x0a, 0x12, 0x02], frontend);
        host.frame().unwrap();
        host.frame().unwrap();
        assert!(host.cpu.is_blocked());
        assert_eq!(2, host.frontend.rendered);
        host.frame().unwrap();
        assert!(!host.cpu.is_blocked());
        assert_eq!(0xb, host.cpu.v()[3]);
    }
}
