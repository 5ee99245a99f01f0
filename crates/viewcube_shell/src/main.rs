//! Headless host for the view cube: drives a scripted session frame by frame
//! the way a windowed app would, and logs what the cube does.

mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use settings::ViewCubeSettings;
use tracing::info;
use view_cube::{face_materials, LabelProvider, Zone};

use crate::script::Session;

/// Stand-in texture provider: records the caption each face would be drawn with.
#[derive(Debug, Default)]
struct CaptionTextures {
    created: usize,
}

#[derive(Debug)]
struct CaptionTexture {
    id: usize,
    caption: String,
}

impl LabelProvider for CaptionTextures {
    type Material = CaptionTexture;

    fn material_for(&mut self, _zone: Zone, caption: &str) -> CaptionTexture {
        self.created += 1;
        CaptionTexture {
            id: self.created,
            caption: caption.to_owned(),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            ViewCubeSettings::from_json_str(&json)
                .with_context(|| format!("invalid settings in {}", path.display()))?
        }
        None => ViewCubeSettings::default(),
    };
    info!(
        "settings: {}",
        settings
            .to_json_string()
            .context("settings serialization failed")?
    );

    let mut textures = CaptionTextures::default();
    for (zone, texture) in face_materials(&mut textures) {
        info!(
            "face {:?} (id {}) -> texture #{} `{}`",
            zone,
            zone.id(),
            texture.id,
            texture.caption
        );
    }

    let mut session = Session::new(&settings, (1280, 720)).context("view cube init failed")?;
    session.run()?;
    Ok(())
}
