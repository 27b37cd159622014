//! Just enough glTF to find a model's animation clips.
//!
//! Accepts either a binary `.glb` container or a plain `.gltf` JSON document.
//! A clip's duration is the largest `max` of its samplers' input accessors,
//! which the format requires to be present.

use crate::models::AnimationClip;
use serde_json::Value;
use smallvec::SmallVec;

const GLB_MAGIC: &[u8; 4] = b"glTF";
const CHUNK_JSON: u32 = 0x4E4F_534A;

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 4)?;
    Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

/// The JSON document of a `.glb` or `.gltf` payload.
pub fn json_chunk(bytes: &[u8]) -> Result<&[u8], String> {
    if !bytes.starts_with(GLB_MAGIC) {
        return Ok(bytes);
    }
    let len = read_u32(bytes, 12).ok_or("truncated glb header")? as usize;
    let kind = read_u32(bytes, 16).ok_or("truncated glb header")?;
    if kind != CHUNK_JSON {
        return Err(format!("first glb chunk is {kind:#x}, expected JSON"));
    }
    20usize
        .checked_add(len)
        .and_then(|end| bytes.get(20..end))
        .ok_or_else(|| "glb JSON chunk runs past end of file".to_string())
}

pub fn animation_clips(bytes: &[u8]) -> Result<SmallVec<[AnimationClip; 2]>, String> {
    let doc: Value = serde_json::from_slice(json_chunk(bytes)?).map_err(|e| e.to_string())?;
    let accessors = doc["accessors"].as_array();
    let Some(animations) = doc["animations"].as_array() else {
        return Ok(SmallVec::new());
    };

    let input_max = |index: &Value| -> f32 {
        index
            .as_u64()
            .and_then(|i| accessors?.get(i as usize))
            .and_then(|a| a["max"][0].as_f64())
            .unwrap_or(0.0) as f32
    };

    Ok(animations
        .iter()
        .enumerate()
        .map(|(i, anim)| {
            let duration = anim["samplers"]
                .as_array()
                .map(|samplers| {
                    samplers
                        .iter()
                        .map(|s| input_max(&s["input"]))
                        .fold(0.0f32, f32::max)
                })
                .unwrap_or(0.0);
            let name = anim["name"]
                .as_str()
                .map(str::to_owned)
                .unwrap_or_else(|| format!("animation_{i}"));
            AnimationClip { name, duration }
        })
        .collect())
}
