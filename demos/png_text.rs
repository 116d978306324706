//! Example: List, read or set PNG text metadata
//!
//! Usage:
//!   cargo run --example png_text <input.png>
//!   cargo run --example png_text <input.png> <key> <value> <output.png>
//!
//! Values that fit in Latin-1 go to a tEXt chunk, anything else to iTXt.

use png_text::{PngText, TextKind};
use std::env;

fn main() -> png_text::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 && args.len() != 5 {
        eprintln!("Usage: {} <input.png> [<key> <value> <output.png>]", args[0]);
        eprintln!("\nExample:");
        eprintln!("  {} photo.png", args[0]);
        eprintln!("  {} photo.png Author \"Jane Doe\" tagged.png", args[0]);
        std::process::exit(1);
    }

    let mut png = PngText::open(&args[1])?;
    println!("{}: {} chunks", args[1], png.chunks().len());

    if args.len() == 2 {
        for chunk in png.chunks() {
            println!("  {} ({} bytes)", chunk.chunk_type(), chunk.length());
        }
        for entry in png.text_entries()? {
            let tag = match entry.kind {
                TextKind::Latin1 => "tEXt",
                TextKind::International => "iTXt",
            };
            println!("  [{}] {} = {}", tag, entry.keyword, entry.text);
        }
        return Ok(());
    }

    let (key, value, output) = (&args[2], &args[3], &args[4]);
    if value.chars().all(|c| (c as u32) <= 0xFF) {
        png.set_text(key, value)?;
        println!("Set tEXt {} = {}", key, value);
    } else {
        png.set_international_text(key, value)?;
        println!("Set iTXt {} = {}", key, value);
    }

    png.write_to(output)?;
    println!("Wrote {}", output);
    Ok(())
}
