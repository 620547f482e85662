use bevy_ecs::prelude::*;
use glam::{Mat4, Vec3};
use organ_console_core::Rgb;
use organ_console_ecs::{SceneNode, WorldPose};
use organ_console_input::{Handedness, InputSource};
use organ_console_ui3d::sphere_touches_point;
use tracing::debug;

use crate::components::{BaseColor, BoxShape, Emissive, SpawnedCube};
use crate::resources::{FrameContext, InteractionSettings, PinchState, Scaling, XrInput};

/// Pinch-to-spawn cubes and two-hand scaling (only when enabled in the config).
///
/// A pinch on a cube held by the other hand starts scaling; a pinch on any
/// other cube picks it up; a pinch in empty space spawns a new cube.
pub fn pinch_cubes(
    mut commands: Commands,
    ctx: Res<FrameContext>,
    input: Res<XrInput>,
    settings: Res<InteractionSettings>,
    mut state: ResMut<PinchState>,
    mut cubes: Query<(Entity, &WorldPose, &BoxShape, &mut SceneNode), With<SpawnedCube>>,
) {
    if !settings.pinch_spawn {
        return;
    }

    for side in Handedness::BOTH {
        if input.0.just_released(InputSource::Pinch(side)) {
            state.selected[side.index()] = None;
            state.scaling = None;
        }
    }

    for side in Handedness::BOTH {
        if !input.0.just_pressed(InputSource::Pinch(side)) {
            continue;
        }
        let Some(hand) = ctx.frame.hand(side) else {
            continue;
        };
        let tip = hand.pointer;

        let touched = cubes.iter().find_map(|(entity, pose, shape, _)| {
            let radius = shape.bounding_radius() * pose.scale_x();
            sphere_touches_point(pose.translation(), radius, tip).then_some(entity)
        });

        match touched {
            Some(cube) if state.selected[side.other().index()] == Some(cube) => {
                let Some(other) = ctx.frame.hand(side.other()) else {
                    continue;
                };
                let initial_distance = tip.distance(other.pointer);
                let initial_scale = cubes
                    .get(cube)
                    .map(|(_, _, _, node)| node.scale.x)
                    .unwrap_or(1.0);
                state.scaling = Some(Scaling {
                    object: cube,
                    initial_scale,
                    initial_distance,
                });
                debug!(?cube, initial_distance, "scaling started");
            }
            Some(cube) => {
                state.selected[side.index()] = Some(cube);
                debug!(?cube, ?side, "cube picked");
            }
            None => {
                let size = Vec3::splat(settings.spawn_size);
                let color = Rgb::from_bits(rand::random::<u32>());
                let cube = commands
                    .spawn((
                        SceneNode::at(tip).with_rotation(hand.rotation),
                        WorldPose(Mat4::from_rotation_translation(hand.rotation, tip)),
                        BoxShape::new(size),
                        BaseColor(color),
                        Emissive::default(),
                        SpawnedCube,
                    ))
                    .id();
                debug!(?cube, ?color, "cube spawned");
            }
        }
    }

    if let Some(scaling) = state.scaling {
        let (Some(left), Some(right)) = (
            ctx.frame.hand(Handedness::Left),
            ctx.frame.hand(Handedness::Right),
        ) else {
            return;
        };
        if scaling.initial_distance > f32::EPSILON {
            if let Ok((_, _, _, mut node)) = cubes.get_mut(scaling.object) {
                let distance = left.pointer.distance(right.pointer);
                node.scale = Vec3::splat(scaling.initial_scale * distance / scaling.initial_distance);
            }
        }
        return;
    }

    // Held cubes ride along with the pinching fingertip.
    for side in Handedness::BOTH {
        let (Some(cube), Some(hand)) = (state.selected[side.index()], ctx.frame.hand(side)) else {
            continue;
        };
        if let Ok((_, _, _, mut node)) = cubes.get_mut(cube) {
            node.translation = hand.pointer;
        }
    }
}
