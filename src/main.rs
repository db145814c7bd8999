use bankara::assets::{cleanup_script, normal_group_script};
use bankara::core::project::BlenderProject;
use bankara::material::MaterialGraphBuilder;
use bankara::textures::{GroupedResult, collect_maps, list_files};
use bankara::{CleanupTarget, ImportConfig, Renderer, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "bankara", version, about = "Build Blender materials from texture folders")]
struct Cli {
    /// TOML file with import settings
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Output {
    /// Write the generated script to FILE
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Send the script to the Live-Link listener running in Blender
    #[arg(long)]
    send: bool,

    /// Live-Link address, e.g. 127.0.0.1:8080
    #[arg(long)]
    address: Option<String>,
}

#[derive(Args, Debug)]
struct Source {
    /// Texture directory (defaults to `folder` from the config)
    dir: Option<PathBuf>,

    /// Image extension without the dot
    #[arg(long)]
    ext: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print how the textures in a directory group into materials
    Scan {
        #[command(flatten)]
        source: Source,

        /// Print the grouping as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate the material import script
    Import {
        #[command(flatten)]
        source: Source,

        #[arg(long, value_enum)]
        renderer: Option<Renderer>,

        /// Material name prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Text between prefix and material name
        #[arg(long)]
        separator: Option<String>,

        #[command(flatten)]
        output: Output,
    },
    /// Generate the RG_Normal_Map node group script
    NormalGroup {
        /// Only build the group when the file does not have it yet
        #[arg(long)]
        ensure: bool,

        #[command(flatten)]
        output: Output,
    },
    /// Generate a script that removes materials and/or images (both if neither flag is given)
    Cleanup {
        #[arg(long)]
        materials: bool,

        #[arg(long)]
        images: bool,

        #[command(flatten)]
        output: Output,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<ImportConfig> {
    match path {
        Some(path) => {
            log::debug!("loading config from {}", path.display());
            ImportConfig::load(path)
        }
        None => Ok(ImportConfig::default()),
    }
}

fn apply_source(config: &mut ImportConfig, source: Source) {
    if let Some(dir) = source.dir {
        config.folder = dir;
    }
    if let Some(ext) = source.ext {
        config.image_format = ext;
    }
}

fn scan(config: &ImportConfig) -> Result<GroupedResult> {
    let ext = config.extension()?;
    let files = list_files(&config.folder, ext)?;
    let maps = collect_maps(&config.folder, &files, ext);
    log::info!(
        "{} materials, {} maps from {} files in {}",
        maps.len(),
        maps.map_count(),
        files.len(),
        config.folder.display()
    );
    Ok(maps)
}

fn emit(project: BlenderProject, output: Output, config: &ImportConfig) -> Result<()> {
    if let Some(path) = &output.out {
        project.write_to(path)?;
    }
    if output.send {
        let mut link = config.live_link.clone();
        if let Some(address) = output.address {
            link.address = address;
        }
        project.send(&link)?;
    }
    if output.out.is_none() && !output.send {
        print!("{}", project.script());
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Scan { source, json } => {
            apply_source(&mut config, source);
            let maps = scan(&config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&maps)?);
            } else {
                for (base, group) in maps.iter() {
                    println!("{}", base);
                    for map in group.iter() {
                        println!("  {:<4} {}", map.map_code, map.file_name);
                    }
                }
            }
            Ok(())
        }
        Command::Import {
            source,
            renderer,
            prefix,
            separator,
            output,
        } => {
            apply_source(&mut config, source);
            if let Some(renderer) = renderer {
                config.renderer = renderer;
            }
            if let Some(prefix) = prefix {
                config.mat_name_prefix = prefix;
            }
            if let Some(separator) = separator {
                config.mat_name_separator = separator;
            }
            config.validate()?;

            let maps = scan(&config)?;
            if maps.is_empty() {
                log::warn!(
                    "no '<material>_<map>.{}' files found in {}",
                    config.image_format,
                    config.folder.display()
                );
            }
            let project = MaterialGraphBuilder::new(&config).import_project(&maps);
            emit(project, output, &config)
        }
        Command::NormalGroup { ensure, output } => {
            let project = BlenderProject::new().add_script(&normal_group_script(ensure));
            emit(project, output, &config)
        }
        Command::Cleanup {
            materials,
            images,
            output,
        } => {
            let all = !materials && !images;
            let mut targets = Vec::new();
            if materials || all {
                targets.push(CleanupTarget::Materials);
            }
            if images || all {
                targets.push(CleanupTarget::Images);
            }
            log::warn!("cleanup script removes {:?} from the open file", targets);
            let project = BlenderProject::new().add_script(&cleanup_script(&targets));
            emit(project, output, &config)
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
