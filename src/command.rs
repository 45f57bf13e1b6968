//! # Command Construction Module
//!
//! Builds the argument list for the external optimizer process.
//!
//! The builder is a pure function: given the same paths and configuration
//! it always produces the same invocation. Nothing here touches the
//! filesystem or spawns anything.

use std::fmt;
use std::path::Path;

use crate::config::Config;

/// A fully assembled external process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.args.join(" "))
    }
}

/// Assembles optimizer invocations from configuration
pub struct CommandBuilder;

impl CommandBuilder {
    /// Build the optimizer invocation for one input/output pair.
    ///
    /// Shape: `<bin> optimize <input> <output> [flags] --no-join`.
    /// The trailing `--no-join` is a fixed workaround for models that break
    /// when the join step merges their meshes; it is not configurable.
    pub fn build(input_path: &Path, output_path: &Path, config: &Config) -> Invocation {
        let preset = config.quality.preset();

        let mut args = vec![
            "optimize".to_string(),
            input_path.to_string_lossy().into_owned(),
            output_path.to_string_lossy().into_owned(),
        ];

        if config.draco {
            args.push("--compress".to_string());
            args.push("draco".to_string());
        }

        if config.texture_compression {
            args.push("--texture-compress".to_string());
            args.push("webp".to_string());
        }

        args.push("--texture-size".to_string());
        args.push(config.max_texture_size.to_string());

        if config.mesh_simplification {
            args.push("--simplify".to_string());
            args.push("--simplify-ratio".to_string());
            args.push(preset.simplify_ratio.to_string());
        }

        args.push("--no-join".to_string());

        Invocation {
            program: config.optimizer_bin.clone(),
            args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Quality;
    use std::path::PathBuf;

    fn build_with(config: &Config) -> Invocation {
        CommandBuilder::build(
            &PathBuf::from("/in/scene.glb"),
            &PathBuf::from("/out/scene.glb"),
            config,
        )
    }

    #[test]
    fn test_full_invocation_shape() {
        let invocation = build_with(&Config::default());

        assert_eq!(invocation.program, "gltf-transform");
        assert_eq!(
            invocation.args,
            vec![
                "optimize",
                "/in/scene.glb",
                "/out/scene.glb",
                "--compress",
                "draco",
                "--texture-compress",
                "webp",
                "--texture-size",
                "1024",
                "--simplify",
                "--simplify-ratio",
                "0.8",
                "--no-join",
            ]
        );
    }

    #[test]
    fn test_no_join_present_with_everything_disabled() {
        let config = Config {
            draco: false,
            texture_compression: false,
            mesh_simplification: false,
            ..Default::default()
        };
        let invocation = build_with(&config);

        assert_eq!(invocation.args.last().unwrap(), "--no-join");
        assert!(!invocation.args.contains(&"--compress".to_string()));
        assert!(!invocation.args.contains(&"--texture-compress".to_string()));
        assert!(!invocation.args.contains(&"--simplify".to_string()));
    }

    #[test]
    fn test_texture_size_comes_from_options() {
        let config = Config {
            max_texture_size: 256,
            ..Default::default()
        };
        let invocation = build_with(&config);

        let idx = invocation
            .args
            .iter()
            .position(|a| a == "--texture-size")
            .unwrap();
        assert_eq!(invocation.args[idx + 1], "256");
    }

    #[test]
    fn test_simplify_ratio_follows_preset() {
        let config = Config {
            quality: Quality::Low,
            ..Default::default()
        };
        let invocation = build_with(&config);

        let idx = invocation
            .args
            .iter()
            .position(|a| a == "--simplify-ratio")
            .unwrap();
        assert_eq!(invocation.args[idx + 1], "0.5");
    }

    #[test]
    fn test_deterministic() {
        let config = Config::default();
        assert_eq!(build_with(&config), build_with(&config));
    }
}
