//! DOM rendering surface
//!
//! Every obstacle and laser is an absolutely positioned `<div>` inside the
//! game area. Placement is in percent of the arena; geometry is read back
//! from layout in CSS pixels relative to the game area.

use std::collections::HashMap;

use game_core::{Aabb, Effect, Geometry, LaserLane, Surface, Visual};
use glam::Vec2;
use hecs::Entity;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::particles;

pub struct DomSurface {
    document: Document,
    arena: HtmlElement,
    player: HtmlElement,
    player_entity: Option<Entity>,
    elements: HashMap<Entity, HtmlElement>,
}

impl DomSurface {
    pub fn new(document: Document, arena: HtmlElement, player: HtmlElement) -> Self {
        Self {
            document,
            arena,
            player,
            player_entity: None,
            elements: HashMap::new(),
        }
    }

    fn element(&self, entity: Entity) -> Option<&HtmlElement> {
        if self.player_entity == Some(entity) {
            Some(&self.player)
        } else {
            self.elements.get(&entity)
        }
    }

    fn create(&self, visual: &Visual) -> Result<HtmlElement, JsValue> {
        let element = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()?;

        match visual {
            Visual::Obstacle { archetype, variant } => {
                let mut class = format!("obstacle-rocket type{variant}");
                if archetype.is_stationary() {
                    class.push_str(" stationary");
                }
                element.set_class_name(&class);
                element.set_text_content(Some(archetype.emoji));
            }
            Visual::PlayerLaser(lane) => {
                element.set_class_name(match lane {
                    LaserLane::Center => "laser laser-center",
                    LaserLane::Left => "laser laser-left",
                    LaserLane::Right => "laser laser-right",
                });
            }
            Visual::EnemyLaser => element.set_class_name("enemy-laser"),
            Visual::Player => {}
        }

        self.arena.append_child(&element)?;
        Ok(element)
    }
}

fn set_position(element: &HtmlElement, pos: Vec2) {
    let style = element.style();
    let placed = style
        .set_property("left", &format!("{}%", pos.x))
        .and_then(|_| style.set_property("top", &format!("{}%", pos.y)));
    if let Err(err) = placed {
        tracing::warn!(?err, "failed to position element");
    }
}

impl Geometry for DomSurface {
    fn rect(&self, entity: Entity) -> Option<Aabb> {
        let element: &Element = self.element(entity)?;
        let origin = self.arena.get_bounding_client_rect();
        let rect = element.get_bounding_client_rect();
        let min = Vec2::new(
            (rect.left() - origin.left()) as f32,
            (rect.top() - origin.top()) as f32,
        );
        let size = Vec2::new(rect.width() as f32, rect.height() as f32);
        Some(Aabb::from_origin_size(min, size))
    }
}

impl Surface for DomSurface {
    fn attach(&mut self, entity: Entity, visual: Visual, pos: Vec2) {
        if visual == Visual::Player {
            self.player_entity = Some(entity);
            set_position(&self.player, pos);
            return;
        }

        match self.create(&visual) {
            Ok(element) => {
                set_position(&element, pos);
                self.elements.insert(entity, element);
            }
            Err(err) => tracing::warn!(?err, ?visual, "failed to create element"),
        }
    }

    fn place(&mut self, entity: Entity, pos: Vec2) {
        if let Some(element) = self.element(entity) {
            set_position(element, pos);
        }
    }

    fn detach(&mut self, entity: Entity) {
        // The player's node is part of the page and outlives sessions
        if self.player_entity == Some(entity) {
            self.player_entity = None;
            return;
        }
        if let Some(element) = self.elements.remove(&entity) {
            element.remove();
        }
    }

    fn effect(&mut self, effect: Effect) {
        match effect {
            Effect::Burst { at, tone } => {
                particles::burst(&self.document, &self.arena, at, tone.color());
            }
            Effect::Explosion {
                at,
                waves,
                interval_ms,
            } => {
                particles::explosion(&self.document, &self.arena, at, waves, interval_ms);
            }
        }
    }
}
