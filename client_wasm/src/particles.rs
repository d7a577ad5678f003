//! Particle bursts
//!
//! Each particle is a short-lived `<div class="particle">` dropped at a
//! random point around the burst origin; the stylesheet fades it out. Nodes
//! remove themselves after their lifetime; a node already gone (arena
//! cleared) is fine.

use game_core::{scatter, BurstTone, Params};
use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

/// Spawn one burst of particles at `at` (px, relative to `arena`)
pub fn burst(document: &Document, arena: &HtmlElement, at: Vec2, color: &str) {
    for _ in 0..Params::BURST_PARTICLES {
        if let Err(err) = spawn_particle(document, arena, at, color) {
            tracing::warn!(?err, "failed to spawn particle");
            return;
        }
    }
}

/// Schedule `waves` explosion bursts, `interval_ms` apart
pub fn explosion(document: &Document, arena: &HtmlElement, at: Vec2, waves: u32, interval_ms: u32) {
    let Some(window) = web_sys::window() else {
        return;
    };

    for wave in 0..waves {
        let document = document.clone();
        let arena = arena.clone();
        let callback = Closure::once_into_js(move || {
            burst(&document, &arena, at, BurstTone::Explosion.color());
        });
        let delay = (wave * interval_ms) as i32;
        if let Err(err) = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            tracing::warn!(?err, wave, "failed to schedule explosion wave");
        }
    }
}

fn spawn_particle(
    document: &Document,
    arena: &HtmlElement,
    at: Vec2,
    color: &str,
) -> Result<(), JsValue> {
    let particle = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()?;
    particle.set_class_name("particle");

    let roll = Vec2::new(js_sys::Math::random() as f32, js_sys::Math::random() as f32);
    let pos = scatter(at, roll);

    let style = particle.style();
    style.set_property("left", &format!("{}px", pos.x))?;
    style.set_property("top", &format!("{}px", pos.y))?;
    style.set_property("background", color)?;
    arena.append_child(&particle)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let expire = Closure::once_into_js(move || particle.remove());
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        expire.unchecked_ref(),
        Params::PARTICLE_LIFETIME_MS,
    )?;
    Ok(())
}
