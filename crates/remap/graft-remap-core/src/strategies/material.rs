use tracing::debug;

use graft_api_core::AssetData;

use crate::context::RemapContext;
use crate::error::RemapError;
use crate::strategy::RemapStrategy;

/// Materials: rebind texture properties declared by the shader.
///
/// Non-texture properties are never touched. A material whose shader is
/// missing is left alone.
pub struct MaterialStrategy;

impl RemapStrategy for MaterialStrategy {
    fn name(&self) -> &'static str {
        "material"
    }

    fn remap(&self, data: &mut AssetData, ctx: &RemapContext<'_>) -> Result<bool, RemapError> {
        let material = match data {
            AssetData::Material(material) => material,
            other => {
                return Err(RemapError::UnexpectedPayload {
                    strategy: self.name(),
                    found: other.variant_name(),
                })
            }
        };
        let shader = match material.shader.map(|id| ctx.store().data(id)) {
            Some(Some(AssetData::Shader(shader))) => shader,
            _ => {
                debug!(shader = ?material.shader, "material has no loadable shader; skipped");
                return Ok(false);
            }
        };

        let mut changed = false;
        for name in shader.texture_properties() {
            let Some(texture) = material.texture(name) else {
                continue;
            };
            if let Some(clone) = ctx.resolve(texture) {
                changed |= material.set_texture(name, Some(clone));
            }
        }
        Ok(changed)
    }
}
