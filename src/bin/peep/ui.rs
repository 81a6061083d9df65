// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! A [minifb] window [Frontend], with debugger keybinds

use minifb::*;
use peep::{error::Result, host::Frontend, keymap::key_for, screen, Screen, CPU};
use std::time::Instant;

#[derive(Clone, Debug)]
pub struct UIBuilder {
    pub width: usize,
    pub height: usize,
    pub name: Option<&'static str>,
    pub window_options: WindowOptions,
}

impl UIBuilder {
    pub fn new(width: usize, height: usize) -> Self {
        UIBuilder {
            width,
            height,
            ..Default::default()
        }
    }
    pub fn build(&self) -> Result<UI> {
        let ui = UI {
            window: Window::new(
                self.name.unwrap_or_default(),
                self.width,
                self.height,
                self.window_options,
            )?,
            keyboard: Default::default(),
            fb: Default::default(),
            beeping: false,
            time: Instant::now(),
        };
        Ok(ui)
    }
}

impl Default for UIBuilder {
    fn default() -> Self {
        UIBuilder {
            width: screen::WIDTH,
            height: screen::HEIGHT,
            name: Some("Peep"),
            window_options: WindowOptions {
                title: true,
                resize: false,
                scale: Scale::X16,
                scale_mode: ScaleMode::AspectRatioStretch,
                none: true,
                ..Default::default()
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameBufferFormat {
    pub fg: u32,
    pub bg: u32,
}

impl Default for FrameBufferFormat {
    fn default() -> Self {
        FrameBufferFormat {
            fg: 0x0011a434,
            bg: 0x001E2431,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameBuffer {
    buffer: Vec<u32>,
    format: FrameBufferFormat,
}

impl FrameBuffer {
    pub fn new(format: FrameBufferFormat) -> Self {
        FrameBuffer {
            buffer: vec![format.bg; screen::WIDTH * screen::HEIGHT],
            format,
        }
    }
    /// Converts the [Screen] into 0RGB pixels
    pub fn draw(&mut self, screen: &Screen) -> &[u32] {
        for (pixel, lit) in self.buffer.iter_mut().zip(screen.pixels()) {
            *pixel = if lit { self.format.fg } else { self.format.bg };
        }
        &self.buffer
    }
    pub fn render(&mut self, window: &mut Window, screen: &Screen) -> Result<()> {
        self.draw(screen);
        window.update_with_buffer(&self.buffer, screen::WIDTH, screen::HEIGHT)?;
        Ok(())
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(Default::default())
    }
}

#[derive(Debug)]
pub struct UI {
    window: Window,
    keyboard: Vec<Key>,
    fb: FrameBuffer,
    beeping: bool,
    time: Instant,
}

impl Frontend for UI {
    fn poll(&mut self, cpu: &mut CPU) -> Result<bool> {
        if !self.window.is_open() {
            return Ok(false);
        }
        let keys = self.window.get_keys();
        // minifb's get_keys_pressed/get_keys_released miss keys between updates
        let released: Vec<Key> = self
            .keyboard
            .iter()
            .filter(|key| !keys.contains(key))
            .copied()
            .collect();
        let pressed: Vec<Key> = keys
            .iter()
            .filter(|key| !self.keyboard.contains(key))
            .copied()
            .collect();
        for key in released {
            if let Some(key) = identify_key(key) {
                cpu.release(key)?;
            }
        }
        // handle keybinds for the UI
        for key in pressed {
            use Key::*;
            match key {
                F1 | Comma => cpu.dump(),
                F2 | Period => cpu.screen().print_screen(),
                F4 | Slash => {
                    cpu.flags.debug();
                    eprintln!(
                        "Debug {}.",
                        if cpu.flags.debug { "enabled" } else { "disabled" }
                    )
                }
                F5 | Backslash => {
                    cpu.flags.pause();
                    eprintln!("{}.", if cpu.flags.pause { "Paused" } else { "Unpaused" })
                }
                F6 | Enter => {
                    eprintln!("Step");
                    if let Err(e) = cpu.singlestep() {
                        eprintln!("{e}");
                    }
                }
                F7 => {
                    eprintln!("Set breakpoint {:03x}.", cpu.pc());
                    cpu.set_break(cpu.pc());
                }
                F8 => {
                    eprintln!("Unset breakpoint {:03x}.", cpu.pc());
                    cpu.unset_break(cpu.pc());
                }
                F9 | Delete => {
                    eprintln!("Reset");
                    cpu.reset();
                }
                Escape => return Ok(false),
                key => {
                    if let Some(key) = identify_key(key) {
                        cpu.press(key)?;
                    }
                }
            }
        }
        self.keyboard = keys;
        Ok(true)
    }

    fn render(&mut self, cpu: &CPU) -> Result<bool> {
        if !self.window.is_open() {
            return Ok(false);
        }
        let note = if self.beeping { " ♪" } else { "" };
        if cpu.flags.pause {
            self.window.set_title(&format!("Peep ⏸{note}"));
        } else {
            self.window.set_title(&format!(
                "Peep ▶ {:02.02}{note}",
                (1.0 / self.time.elapsed().as_secs_f64())
            ));
        }
        self.time = Instant::now();
        self.fb.render(&mut self.window, cpu.screen())?;
        Ok(true)
    }

    fn sound(&mut self, on: bool) {
        self.beeping = on;
    }
}

/// Gets the keypad key bound to a keyboard key
pub fn identify_key(key: Key) -> Option<usize> {
    let c = match key {
        Key::Key1 => '1',
        Key::Key2 => '2',
        Key::Key3 => '3',
        Key::Key4 => '4',
        Key::Q => 'q',
        Key::W => 'w',
        Key::E => 'e',
        Key::R => 'r',
        Key::A => 'a',
        Key::S => 's',
        Key::D => 'd',
        Key::F => 'f',
        Key::Z => 'z',
        Key::X => 'x',
        Key::C => 'c',
        Key::V => 'v',
        _ => return None,
    };
    key_for(c)
}
