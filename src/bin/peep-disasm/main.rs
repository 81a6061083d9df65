//! Prints a listing of a Chip-8 ROM

use gumdrop::*;
use owo_colors::OwoColorize;
use peep::{error::Result, *};
use std::{io::Write, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "Load a ROM to disassemble", free, required)]
    pub file: PathBuf,
    #[options(
        help = "Load address (usually 200)",
        parse(try_from_str = "parse_hex"),
        default = "200"
    )]
    pub loadaddr: u16,
    #[options(help = "Start disassembling at offset...")]
    pub offset: usize,
    #[options(help = "Print without color")]
    pub plain: bool,
}

fn parse_hex(value: &str) -> std::result::Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(value.trim_start_matches("0x"), 16)
}

fn main() -> Result<()> {
    env_logger::init();
    let options = Arguments::parse_args_default_or_exit();
    let contents = std::fs::read(&options.file).map_err(|source| error::Error::RomRead {
        path: options.file.clone(),
        source,
    })?;
    let disassembler = if options.plain {
        Dis::plain()
    } else {
        Dis::default()
    };
    list(&mut std::io::stdout().lock(), &contents, &options, &disassembler)
}

/// Writes one line per word of `contents`, starting at `options.offset`
fn list(out: &mut impl Write, contents: &[u8], options: &Arguments, dis: &Dis) -> Result<()> {
    let start = options.offset.min(contents.len());
    for (addr, word) in contents[start..].chunks_exact(2).enumerate() {
        let word = u16::from_be_bytes([word[0], word[1]]);
        let addr = 2 * addr + options.loadaddr as usize + start;
        if options.plain {
            writeln!(out, "{addr:03x}: {} {word:04x}", dis.once(word))?;
        } else {
            writeln!(
                out,
                "{:03x}: {} {:04x}",
                addr,
                dis.once(word),
                word.bright_black(),
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(args: &[&str]) -> Arguments {
        let mut args = args.to_vec();
        args.extend(["--plain", "rom.ch8"]);
        Arguments::parse_args_default(&args).unwrap()
    }

    #[test]
    fn listing() {
        let mut out = vec![];
        list(&mut out, b"\x00\xe0\x12\x02", &plain(&[]), &Dis::plain()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(2, lines.len());
        assert!(lines[0].starts_with("200: cls"));
        assert!(lines[1].starts_with("202: jp"));
        assert!(lines[1].ends_with("1202"));
    }

    #[test]
    fn listing_offset() {
        let mut out = vec![];
        let options = plain(&["--offset", "2", "--loadaddr", "300"]);
        list(&mut out, b"\x00\xe0\x00\xee\xff", &options, &Dis::plain()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(1, text.lines().count());
        assert!(text.starts_with("302: ret"));
    }

    /// A writer whose reader has gone away
    struct Closed;
    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn listing_to_closed_pipe() {
        match list(&mut Closed, b"\x00\xe0", &plain(&[]), &Dis::plain()) {
            Err(error::Error::IoError(e)) => {
                assert_eq!(std::io::ErrorKind::BrokenPipe, e.kind())
            }
            other => panic!("{other:?}"),
        }
    }
}
