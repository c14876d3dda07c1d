//! Aina CLI - fitting-room profile and model tool.
//!
//! Usage: aina [OPTIONS] <COMMAND>
//!
//! Run `aina --help` for available commands.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use aina::catalog::Catalog;
use aina::classify::{body_type, classify, ShapeLabel};
use aina::config::Config;
use aina::io::{AssetLoader, FileLoader};
use aina::model::Placement;
use aina::profile::{Gender, UserProfile};
use aina::resolve::{AssetFormat, ResolverMode};
use aina::storage::{self, FileStorage, Storage, PROFILE_KEY};
use aina::units::UnitSystem;

#[derive(Parser)]
#[command(name = "aina")]
#[command(author, version, about = "Virtual fitting-room CLI", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Profile store directory (overrides the config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Units for entering and showing measurements
    #[arg(short, long, global = true, default_value = "metric")]
    units: UnitSystem,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Classify the stored profile
    Classify,

    /// Show which model the stored profile maps to
    Resolve {
        /// Use the average placeholder model set
        #[arg(long)]
        placeholder: bool,

        /// Model file format (glb or obj)
        #[arg(short, long)]
        format: Option<AssetFormat>,
    },

    /// Load a model file and print its statistics
    Inspect {
        /// Model file (.glb, .gltf or .obj)
        input: PathBuf,
    },

    /// List the garment catalog
    Catalog {
        /// Mark a garment as selected (0-based index)
        #[arg(short, long)]
        select: Option<usize>,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Start a new profile with the defaults for a gender
    Init {
        /// male or female
        gender: Gender,
    },

    /// Set one measurement, in the units given by --units
    Set {
        /// height, weight, shoulder, chest, belly, waist or hips
        field: String,

        /// New value
        value: f64,
    },

    /// Change gender, resetting measurements to that gender's defaults
    Gender {
        /// male or female
        gender: Gender,
    },

    /// Print the profile
    Show {
        /// Print the stored JSON record
        #[arg(long)]
        json: bool,
    },

    /// Delete the stored profile
    Clear,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(store) = cli.store {
        config.store_dir = store;
    }
    let mut store = FileStorage::new(&config.store_dir);

    match cli.command {
        Commands::Profile { action } => cmd_profile(&mut store, action, cli.units, &config)?,
        Commands::Classify => cmd_classify(&mut store, cli.units, &config)?,
        Commands::Resolve {
            placeholder,
            format,
        } => {
            let mode = if placeholder {
                ResolverMode::Placeholder
            } else {
                config.resolver
            };
            let mut source = config.viewer.source.clone();
            if let Some(format) = format {
                source.format = format;
            }
            let profile = storage::load_profile(&mut store, UnitSystem::Metric, config.weight_policy)?;
            let key = mode.resolve_profile(&profile);
            println!("Model: {}", key);
            println!("Path: {}", source.path_for(&key).display());
        }
        Commands::Inspect { input } => cmd_inspect(&input, &config)?,
        Commands::Catalog { select } => {
            let mut catalog = Catalog::default();
            if let Some(index) = select {
                if catalog.select(index).is_none() {
                    return Err(format!("no garment at index {}", index).into());
                }
            }
            for (i, item) in catalog.items().iter().enumerate() {
                let marker = if catalog.selected() == Some(item) { '*' } else { ' ' };
                println!("{} {:>2}  {:<14} {:<10} {}", marker, i, item.name, item.brand, item.price);
            }
        }
    }

    Ok(())
}

fn cmd_profile(
    store: &mut FileStorage,
    action: ProfileAction,
    units: UnitSystem,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let policy = config.weight_policy;
    match action {
        ProfileAction::Init { gender } => {
            let mut profile = UserProfile::for_gender(gender);
            profile.set_unit_system(units, policy);
            storage::save_profile(store, &profile, policy)?;
            print_profile(&profile);
        }
        ProfileAction::Set { field, value } => {
            let mut profile = storage::load_profile(store, units, policy)?;
            profile.set_field(&field, value)?;
            storage::save_profile(store, &profile, policy)?;
            print_profile(&storage::load_profile(store, units, policy)?);
        }
        ProfileAction::Gender { gender } => {
            let mut profile = storage::load_profile(store, units, policy)?;
            profile.set_gender(gender);
            storage::save_profile(store, &profile, policy)?;
            print_profile(&profile);
        }
        ProfileAction::Show { json } => {
            if json {
                match store.get(PROFILE_KEY)? {
                    Some(raw) => println!("{}", raw),
                    None => println!("No stored profile"),
                }
            } else {
                print_profile(&storage::load_profile(store, units, policy)?);
            }
        }
        ProfileAction::Clear => {
            store.remove(PROFILE_KEY)?;
            println!("Profile cleared");
        }
    }
    Ok(())
}

fn cmd_classify(
    store: &mut FileStorage,
    units: UnitSystem,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = storage::load_profile(store, units, config.weight_policy)?;
    let shape = classify(&profile);

    println!("Gender: {}", profile.gender);
    println!("Shape: {}", shape.display_name());
    println!("Body type: {}", body_type(&profile).label());

    let options: Vec<&str> = ShapeLabel::options_for(profile.gender)
        .iter()
        .map(|s| s.display_name())
        .collect();
    if options.is_empty() {
        println!("Choose a gender to see shape options");
    } else {
        println!("Options: {}", options.join(", "));
    }
    Ok(())
}

fn cmd_inspect(input: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let loader = FileLoader::new();
    let model = loader.load(input)?;

    println!("File: {}", input.display());
    println!("Draco: {}", if loader.has_draco() { "available" } else { "unavailable" });
    println!("Vertices: {}", model.num_vertices());
    println!("Triangles: {}", model.num_triangles());
    if !model.materials.is_empty() {
        println!("Materials: {}", model.materials.join(", "));
    }

    if let Some(bounds) = model.bounds() {
        let (min, max) = (bounds.min, bounds.max);
        println!("Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z);
        let size = bounds.size();
        println!("Dimensions: {:.3} x {:.3} x {:.3}", size.x, size.y, size.z);

        let viewer = &config.viewer;
        let placement = Placement::fit(&bounds, viewer.target_height, viewer.floor_offset);
        println!("Viewer scale: {:.4} (target height {})", placement.scale, viewer.target_height);
    }
    Ok(())
}

fn print_profile(profile: &UserProfile) {
    let len = profile.unit_system.length_unit();
    println!("Gender: {}", profile.gender);
    println!("Units: {}", profile.unit_system);
    println!("Height: {:.1} {}", profile.height, len);
    println!("Weight: {:.1} {}", profile.weight, profile.unit_system.mass_unit());
    for (name, value) in [
        ("Shoulder", profile.shoulder),
        ("Chest", profile.chest),
        ("Belly", profile.belly),
        ("Waist", profile.waist),
        ("Hips", profile.hips),
    ] {
        println!("{}: {:.1} {}", name, value, len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_profile_set() {
        let cli = Cli::try_parse_from(["aina", "--units", "imperial", "profile", "set", "chest", "40"]).unwrap();
        assert_eq!(cli.units, UnitSystem::Imperial);
        assert!(matches!(
            cli.command,
            Commands::Profile { action: ProfileAction::Set { ref field, value } } if field == "chest" && value == 40.0
        ));
    }

    #[test]
    fn test_rejects_unknown_gender() {
        assert!(Cli::try_parse_from(["aina", "profile", "init", "robot"]).is_err());
    }

    #[test]
    fn test_profile_commands_against_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let mut store = FileStorage::new(dir.path());

        cmd_profile(&mut store, ProfileAction::Init { gender: Gender::Male }, UnitSystem::Metric, &config).unwrap();
        cmd_profile(
            &mut store,
            ProfileAction::Set { field: "belly".into(), value: 120.0 },
            UnitSystem::Metric,
            &config,
        )
        .unwrap();

        let profile = storage::load_profile(&mut store, UnitSystem::Metric, config.weight_policy).unwrap();
        assert_eq!(ResolverMode::Shape.resolve_profile(&profile).as_str(), "male_oval");

        cmd_profile(&mut store, ProfileAction::Clear, UnitSystem::Metric, &config).unwrap();
        assert!(store.get(PROFILE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_imperial_profile_keeps_entered_values() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let mut store = FileStorage::new(dir.path());

        cmd_profile(&mut store, ProfileAction::Init { gender: Gender::Male }, UnitSystem::Imperial, &config).unwrap();
        for (field, value) in [("weight", 151.0), ("chest", 38.5)] {
            cmd_profile(
                &mut store,
                ProfileAction::Set { field: field.into(), value },
                UnitSystem::Imperial,
                &config,
            )
            .unwrap();
        }

        let profile = storage::load_profile(&mut store, UnitSystem::Imperial, config.weight_policy).unwrap();
        assert_eq!(profile.weight, 151.0);
        assert_eq!(profile.chest, 38.5);
        assert_eq!(profile.shoulder, (106.0_f64 / 2.54).round());
    }

    #[test]
    fn test_keep_weight_policy_applies_to_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_json(r#"{"weightPolicy": "keep"}"#).unwrap();
        let mut store = FileStorage::new(dir.path());

        cmd_profile(&mut store, ProfileAction::Init { gender: Gender::Male }, UnitSystem::Imperial, &config).unwrap();

        let raw = store.get(PROFILE_KEY).unwrap().unwrap();
        let stored: UserProfile = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.weight, 75.0);
        assert!((stored.height - 175.0).abs() < 2.54);
    }
}
