use clap::{Parser, Subcommand};
use qrgen::render::image::to_image;
use qrgen::render::text::to_string_art;
use qrgen::{encode_with_options, ECLevel, EncodeOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "qrgen", version, about = "QR code encoder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode content into a PNG file, or text art on stdout
    Encode {
        /// Content to encode; multiple arguments are joined with spaces
        #[arg(required = true)]
        content: Vec<String>,
        /// Error correction level: l, m, q or h
        #[arg(long, short, default_value = "m", value_parser = parse_level)]
        level: ECLevel,
        /// Output PNG path; omit to print text art instead
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Image width and height in pixels
        #[arg(long, short, default_value_t = 256)]
        size: u32,
        /// Quiet zone width in modules
        #[arg(long, default_value_t = 4)]
        quiet_zone: usize,
        /// Force a symbol version (1-40)
        #[arg(long)]
        symbol_version: Option<u8>,
        /// Force a mask pattern (0-7)
        #[arg(long)]
        mask: Option<u8>,
        /// Swap dark and light in text art output
        #[arg(long, short)]
        invert: bool,
    },
    /// Print the symbol parameters chosen for some content
    Info {
        /// Content to analyze; multiple arguments are joined with spaces
        #[arg(required = true)]
        content: Vec<String>,
        /// Error correction level: l, m, q or h
        #[arg(long, short, default_value = "m", value_parser = parse_level)]
        level: ECLevel,
    },
}

fn parse_level(value: &str) -> Result<ECLevel, String> {
    match value.to_ascii_lowercase().as_str() {
        "l" | "low" => Ok(ECLevel::L),
        "m" | "medium" => Ok(ECLevel::M),
        "q" | "quartile" => Ok(ECLevel::Q),
        "h" | "high" => Ok(ECLevel::H),
        other => Err(format!("unknown level '{}', expected l/m/q/h", other)),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Encode {
            content,
            level,
            out,
            size,
            quiet_zone,
            symbol_version,
            mask,
            invert,
        } => {
            let content = content.join(" ");
            let options = EncodeOptions {
                quiet_zone,
                version: symbol_version,
                mask,
            };
            let qr = match encode_with_options(content.as_bytes(), level, &options) {
                Ok(qr) => qr,
                Err(err) => {
                    eprintln!("Failed to encode: {}", err);
                    return ExitCode::FAILURE;
                }
            };

            match out {
                Some(path) => {
                    let img = to_image(&qr, size);
                    if let Err(err) = img.save(&path) {
                        eprintln!("Failed to write {}: {}", path.display(), err);
                        return ExitCode::FAILURE;
                    }
                }
                None => print!("{}", to_string_art(&qr, invert)),
            }
        }
        Command::Info { content, level } => {
            let content = content.join(" ");
            let qr = match encode_with_options(content.as_bytes(), level, &EncodeOptions::default())
            {
                Ok(qr) => qr,
                Err(err) => {
                    eprintln!("Failed to encode: {}", err);
                    return ExitCode::FAILURE;
                }
            };
            println!(
                "version={} size={}x{} level={:?} mask={} quiet_zone={}",
                qr.version,
                qr.size,
                qr.size,
                qr.level,
                qr.mask.index(),
                qr.quiet_zone
            );
        }
    }

    ExitCode::SUCCESS
}
