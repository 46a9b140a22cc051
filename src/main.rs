// main.rs      minitel-gif command
//
// Copyright (c) 2026  minitel-gif developers
//
#![forbid(unsafe_code)]

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use minitel_gif::{ColorIndex, Encoder, TablePolicy, PALETTE_LEN};
use pix::rgb::SRgba8;
use std::error::Error;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Crate version
const VERSION: &str = std::env!("CARGO_PKG_VERSION");

/// Bytes per RGBA pixel
const RGBA: usize = 4;

/// Main entry point
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().format_timestamp(None).init();
    let mut out = StandardStream::stdout(ColorChoice::Auto);
    match create_app().get_matches().subcommand() {
        ("encode", Some(matches)) => encode(&mut out, matches)?,
        ("palette", Some(_matches)) => palette(&mut out)?,
        _ => unreachable!(),
    }
    out.reset()?;
    Ok(())
}

/// Create clap App
fn create_app() -> App<'static, 'static> {
    App::new("minitel-gif")
        .version(VERSION)
        .setting(AppSettings::GlobalVersion)
        .about("Minitel GIF encoder")
        .setting(AppSettings::ArgRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("encode")
                .about("Encode raw RGBA pixels into a GIF")
                .arg(
                    Arg::with_name("input")
                        .required(true)
                        .help("raw RGBA input file"),
                )
                .arg(
                    Arg::with_name("output")
                        .required(true)
                        .help("GIF output file"),
                )
                .arg(
                    Arg::with_name("width")
                        .long("width")
                        .takes_value(true)
                        .default_value("320")
                        .help("image width (pixels)"),
                )
                .arg(
                    Arg::with_name("height")
                        .long("height")
                        .takes_value(true)
                        .default_value("250")
                        .help("image height (pixels)"),
                )
                .arg(
                    Arg::with_name("delay")
                        .long("delay")
                        .takes_value(true)
                        .default_value("40")
                        .help("frame delay (milliseconds)"),
                )
                .arg(
                    Arg::with_name("reject-overflow")
                        .long("reject-overflow")
                        .help("fail instead of resetting a full code table"),
                ),
        )
        .subcommand(
            SubCommand::with_name("palette").about("Show the fixed palette"),
        )
}

/// Parse a numeric argument
fn number(matches: &ArgMatches, name: &str) -> Result<u32, Box<dyn Error>> {
    let value = matches.value_of(name).unwrap_or_default();
    value
        .parse()
        .map_err(|_| format!("invalid {}: {:?}", name, value).into())
}

/// Handle encode subcommand
fn encode(
    out: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    let width = number(matches, "width")?;
    let height = number(matches, "height")?;
    let delay = number(matches, "delay")?;
    let policy = if matches.is_present("reject-overflow") {
        TablePolicy::Reject
    } else {
        TablePolicy::Reset
    };
    let input = matches.value_of_os("input").ok_or("missing input")?;
    let output = matches.value_of_os("output").ok_or("missing output")?;
    let raw = fs::read(input)?;
    if raw.len() % RGBA != 0 {
        return Err(format!("{} bytes is not RGBA data", raw.len()).into());
    }
    let pixels: Vec<SRgba8> = raw
        .chunks_exact(RGBA)
        .map(|c| SRgba8::new(c[0], c[1], c[2], c[3]))
        .collect();
    let mut enc = Encoder::new(width, height, delay).with_table_policy(policy);
    enc.add(&pixels, width, height, delay)?;
    let writer = BufWriter::new(File::create(output)?);
    enc.save_to(writer)?;
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    out.set_color(&bold)?;
    writeln!(out, "{:?}: {}x{}, {} ms", output, width, height, delay)?;
    Ok(())
}

/// Handle palette subcommand
fn palette(out: &mut StandardStream) -> Result<(), Box<dyn Error>> {
    let mut yellow = ColorSpec::new();
    yellow.set_fg(Some(Color::Yellow)).set_intense(true);
    out.set_color(&yellow)?;
    writeln!(out, " Idx  RGB")?;
    for i in 0..PALETTE_LEN as u8 {
        let idx = ColorIndex::new(i).ok_or("invalid index")?;
        let [r, g, b] = idx.rgb();
        let mut swatch = ColorSpec::new();
        swatch.set_bg(Some(Color::Rgb(r, g, b)));
        out.reset()?;
        write!(out, " {:>3}  {:02X}{:02X}{:02X} ", i, r, g, b)?;
        out.set_color(&swatch)?;
        write!(out, "    ")?;
        out.reset()?;
        if idx.is_transparent() {
            write!(out, " transparent")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
