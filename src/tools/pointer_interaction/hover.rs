use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::window::PrimaryWindow;

use super::picking::{pick_ray, ray_pick};
use super::pointer::PointerSample;
use crate::engine::loading::config_loader::ActiveSceneConfig;
use crate::engine::loading::model_loader::{Pickable, PickableName};

/// The nearest pickable object under the cursor, as seen by the state
/// machine: its entity, its current material colour, and whether the name
/// filter allows recolouring it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverTarget {
    pub entity: Entity,
    pub color: Color,
    pub recolor: bool,
}

/// Colour mutation ordered by a hover transition. Restores always carry the
/// colour captured when the object was entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverEffect {
    Restore { entity: Entity, color: Color },
    Highlight { entity: Entity },
}

#[derive(Debug, Clone, Copy)]
struct HoveredEntry {
    entity: Entity,
    original: Color,
}

/// Two-state hover machine: Idle, or exactly one hovered object whose
/// original colour was captured before any mutation. The captured colour is
/// stored in the same step that selects the object, so a restore without a
/// capture cannot be represented.
#[derive(Resource, Default)]
pub struct HoverState {
    hovered: Option<HoveredEntry>,
}

impl HoverState {
    pub fn hovered_entity(&self) -> Option<Entity> {
        self.hovered.map(|entry| entry.entity)
    }

    /// Feed one resolved pick result into the machine and collect the
    /// colour mutations it orders. Re-observing the current object is a
    /// no-op, so repeated identical samples never mutate twice.
    pub fn observe(&mut self, top: Option<HoverTarget>) -> Vec<HoverEffect> {
        let mut effects = Vec::new();
        match (self.hovered, top) {
            (Some(entry), Some(target)) if entry.entity == target.entity => {}
            (previous, Some(target)) => {
                if let Some(entry) = previous {
                    effects.push(HoverEffect::Restore {
                        entity: entry.entity,
                        color: entry.original,
                    });
                }
                self.hovered = Some(HoveredEntry {
                    entity: target.entity,
                    original: target.color,
                });
                if target.recolor {
                    effects.push(HoverEffect::Highlight {
                        entity: target.entity,
                    });
                }
            }
            (Some(entry), None) => {
                effects.push(HoverEffect::Restore {
                    entity: entry.entity,
                    color: entry.original,
                });
                self.hovered = None;
            }
            (None, None) => {}
        }
        effects
    }
}

// Resolve the mesh under the cursor each frame and drive the hover machine,
// writing its colour effects into the material assets
pub fn pointer_hover_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    q_pickable: Query<
        (
            Entity,
            &GlobalTransform,
            &Aabb,
            &PickableName,
            &MeshMaterial3d<StandardMaterial>,
        ),
        With<Pickable>,
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut hover: ResMut<HoverState>,
    config: Res<ActiveSceneConfig>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    // No cursor means no pointer event; leave the current hover in place.
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };

    let viewport = Vec2::new(window.width(), window.height());
    let sample = PointerSample::from_cursor(cursor_pos, viewport);
    let top = pick_ray(sample, camera, camera_transform).and_then(|ray| {
        let hits = ray_pick(
            ray,
            q_pickable.iter().map(|(e, xf, aabb, _, _)| (e, *xf, *aabb)),
        );
        hits.first().and_then(|hit| {
            let (_, _, _, name, material) = q_pickable.get(hit.entity).ok()?;
            let color = materials.get(&material.0)?.base_color;
            Some(HoverTarget {
                entity: hit.entity,
                color,
                recolor: config.0.hover.passes_filter(&name.0),
            })
        })
    });

    let highlight = config.0.hover.highlight_color();
    for effect in hover.observe(top) {
        let (entity, color) = match effect {
            HoverEffect::Restore { entity, color } => (entity, color),
            HoverEffect::Highlight { entity } => (entity, highlight),
        };
        let Ok((_, _, _, _, material)) = q_pickable.get(entity) else {
            warn!("Hovered entity {} despawned before its colour could be written", entity);
            continue;
        };
        let Some(material) = materials.get_mut(&material.0) else {
            warn!("Hovered entity {} lost its material before its colour could be written", entity);
            continue;
        };
        material.base_color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(entity: Entity, color: Color) -> HoverTarget {
        HoverTarget {
            entity,
            color,
            recolor: true,
        }
    }

    #[test]
    fn entering_an_object_highlights_it_once() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let mut hover = HoverState::default();

        let effects = hover.observe(Some(target(a, Color::srgb(0.2, 0.4, 0.6))));
        assert_eq!(effects, vec![HoverEffect::Highlight { entity: a }]);

        // Same top hit again: idempotent, no further mutation.
        assert!(hover.observe(Some(target(a, Color::srgb(1.0, 0.0, 0.0)))).is_empty());
        assert!(hover.observe(Some(target(a, Color::srgb(1.0, 0.0, 0.0)))).is_empty());
        assert_eq!(hover.hovered_entity(), Some(a));
    }

    #[test]
    fn leaving_restores_the_captured_color() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let original = Color::srgb(0.2, 0.4, 0.6);
        let mut hover = HoverState::default();

        hover.observe(Some(target(a, original)));
        let effects = hover.observe(None);
        assert_eq!(
            effects,
            vec![HoverEffect::Restore { entity: a, color: original }]
        );
        assert_eq!(hover.hovered_entity(), None);
    }

    #[test]
    fn switching_objects_restores_before_highlighting() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let color_a = Color::srgb(0.1, 0.2, 0.3);
        let color_b = Color::srgb(0.4, 0.5, 0.6);
        let mut hover = HoverState::default();

        hover.observe(Some(target(a, color_a)));
        let effects = hover.observe(Some(target(b, color_b)));
        assert_eq!(
            effects,
            vec![
                HoverEffect::Restore { entity: a, color: color_a },
                HoverEffect::Highlight { entity: b },
            ]
        );

        // Exit to empty space restores B.
        let effects = hover.observe(None);
        assert_eq!(
            effects,
            vec![HoverEffect::Restore { entity: b, color: color_b }]
        );
    }

    #[test]
    fn filtered_object_is_tracked_but_not_recolored() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let original = Color::srgb(0.7, 0.7, 0.7);
        let mut hover = HoverState::default();

        let effects = hover.observe(Some(HoverTarget {
            entity: a,
            color: original,
            recolor: false,
        }));
        assert!(effects.is_empty());
        assert_eq!(hover.hovered_entity(), Some(a));

        // Capture already occurred, so the exit still restores.
        let effects = hover.observe(None);
        assert_eq!(
            effects,
            vec![HoverEffect::Restore { entity: a, color: original }]
        );
    }

    #[test]
    fn empty_scene_stays_idle() {
        let mut hover = HoverState::default();
        assert!(hover.observe(None).is_empty());
        assert_eq!(hover.hovered_entity(), None);
    }
}
