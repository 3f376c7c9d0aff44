/// Command line front end
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::state::data::Coordinate;
use crate::state::edit::Parameter;

#[derive(Parser, Debug)]
#[command(name = "image-post-filters", version, about = "Filter, geotag and post photos")]
pub struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter a photo and post it
    Post {
        /// Photo to post
        image: PathBuf,

        /// Title of the post
        #[arg(short, long)]
        title: String,

        /// Position to stamp on the post, as LAT,LON
        #[arg(long, value_parser = parse_coordinate)]
        at: Option<Coordinate>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Re-filter an existing post and post the result at the same position
    Repost {
        /// ID of the post to start from
        id: i64,

        /// Title of the new post (defaults to the original title)
        #[arg(short, long)]
        title: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List posts with their thumbnail sizes
    List,

    /// Print one map pin per post
    Map,

    /// Delete a post
    Remove { id: i64 },
}

/// Slider positions given on the command line
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// JSON preset with any of the slider values
    #[arg(long)]
    pub preset: Option<PathBuf>,

    #[arg(long, allow_hyphen_values = true)]
    pub brightness: Option<f32>,

    #[arg(long)]
    pub saturation: Option<f32>,

    #[arg(long)]
    pub contrast: Option<f32>,

    /// Blur radius in pixels
    #[arg(long)]
    pub blur: Option<f32>,

    /// Bloom radius in pixels
    #[arg(long)]
    pub bloom: Option<f32>,

    /// Write the final slider values to this file as a JSON preset
    #[arg(long)]
    pub save_preset: Option<PathBuf>,

    /// Skip the photo library export
    #[arg(long)]
    pub no_export: bool,
}

impl FilterArgs {
    /// Sliders set explicitly, in slider order
    pub fn overrides(&self) -> Vec<(Parameter, f32)> {
        [
            (Parameter::Brightness, self.brightness),
            (Parameter::Saturation, self.saturation),
            (Parameter::Contrast, self.contrast),
            (Parameter::BlurRadius, self.blur),
            (Parameter::BloomRadius, self.bloom),
        ]
        .into_iter()
        .filter_map(|(param, value)| value.map(|v| (param, v)))
        .collect()
    }
}

fn parse_coordinate(s: &str) -> Result<Coordinate, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got `{}`", s))?;
    let latitude: f64 = lat.trim().parse().map_err(|e| format!("bad latitude: {}", e))?;
    let longitude: f64 = lon.trim().parse().map_err(|e| format!("bad longitude: {}", e))?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(format!("`{}` is not a valid position", s));
    }
    Ok(Coordinate::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(
            parse_coordinate("37.33, -122.03").unwrap(),
            Coordinate::new(37.33, -122.03)
        );
        assert!(parse_coordinate("37.33").is_err());
        assert!(parse_coordinate("91,0").is_err());
        assert!(parse_coordinate("north,east").is_err());
    }

    #[test]
    fn test_post_command_parses_sliders() {
        let cli = Cli::try_parse_from([
            "image-post-filters",
            "post",
            "beach.jpg",
            "--title",
            "Sunset",
            "--brightness",
            "-0.2",
            "--bloom",
            "8",
            "--at",
            "10,20",
            "--save-preset",
            "warm.json",
        ])
        .unwrap();

        let Commands::Post { title, at, filters, .. } = cli.command else {
            panic!("expected post command");
        };
        assert_eq!(title, "Sunset");
        assert_eq!(at, Some(Coordinate::new(10.0, 20.0)));
        assert_eq!(filters.save_preset, Some(PathBuf::from("warm.json")));
        assert_eq!(
            filters.overrides(),
            vec![(Parameter::Brightness, -0.2), (Parameter::BloomRadius, 8.0)]
        );
    }
}
