use anyhow::Result;
use clap::CommandFactory;

use laveqed::config::{Args, Command, Config};
use laveqed::{Document, DocumentCodec};

fn main() -> Result<()> {
    let config = Config::from_env();

    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();

    let codec = DocumentCodec::new(&config.output_dir);

    match config.command {
        Command::Help => {
            Args::command().print_help()?;
        }
        Command::Read { filename } => {
            let mut document = Document::default();
            document.equation_only = true;
            codec.load(&mut document, &filename)?;
            println!("{}", document.equation);
        }
        Command::Build {
            equation,
            name,
            scale,
            cleanup,
        } => {
            let mut document = Document::new(equation).with_name(&name);
            document.scale = scale;
            document.cleanup_after_build = cleanup;
            let svg = codec.build(&document)?;
            log::info!("wrote {}", svg.display());
        }
    }

    Ok(())
}
