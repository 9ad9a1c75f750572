//! Rendering: scene passes, the shadow and post chains, and the overlay.

mod overlay;

use anyhow::Result;
use engine_core::{Mat4, Quat, Vec3};
use renderer::{BodyInstance, InstanceData, LineBatch, SHADOW_INSTANCE_OFFSET};

use crate::catalog::{PlanetConfig, PLANET_CONFIGS, SUN_CORONA_RADIUS, SUN_RADIUS};
use crate::scene::{
    BeltRock, Comet, Halo, Orbit, Planet, Spin, COMET_HEAD_RADIUS, COMET_TAIL_LENGTH,
    COMET_TAIL_SEGMENTS,
};
use crate::update::SELECTION_SCALE;
use crate::ViewerState;

/// Redraw the shadow map every Nth frame; the casters move slowly enough.
const SHADOW_INTERVAL: u64 = 3;
/// Only bodies at least this large throw a readable shadow.
const SHADOW_CASTER_MIN_SIZE: f32 = 0.4;
/// Belt rocks this close to the camera join the caster set.
const ROCK_CASTER_RANGE: f32 = 30.0;

const ORBIT_LINE_SEGMENTS: usize = 100;
const ORBIT_LINE_COLOR: [f32; 4] = [0.0, 1.0, 1.0, 0.5];
const ORBIT_LINE_HOVERED: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
// 0x00bfff, deep sky blue
const SELECTION_RING_COLOR: [f32; 3] = [0.0, 0.75, 1.0];
// 0xfff700
const HALO_DOT_COLOR: [f32; 4] = [1.0, 0.97, 0.0, 1.0];
const COMET_HEAD_COLOR: [f32; 4] = [0.9, 0.95, 1.0, 0.98];
const COMET_TAIL_COLOR: [f32; 3] = [0.6, 0.8, 1.0];
// 0xffff99 at the hover wash opacity
const HOVER_SHELL_COLOR: [f32; 4] = [1.0, 1.0, 0.6, 0.45];
const ROCK_COLOR: [f32; 4] = [0.54, 0.5, 0.45, 1.0];
const CORONA_TINT: [f32; 4] = [1.0, 0.8, 0.3, 1.0];

/// Shadow map resolution for the camera distance. Close-up gets the crisp
/// map; the overview can live with a quarter of the texels.
fn shadow_lod(camera_distance: f32) -> u32 {
    if camera_distance > 50.0 {
        1024
    } else if camera_distance > 30.0 {
        2048
    } else {
        4096
    }
}

/// One planet's per-frame draw parameters, captured from the ECS once.
struct PlanetDraw {
    index: usize,
    position: Vec3,
    spin_angle: f32,
    /// 1.0, or the selection enlargement.
    scale: f32,
}

impl PlanetDraw {
    /// Body transform: tilt is a fixed roll, spin turns about the tilted axis.
    fn model(&self, config: &PlanetConfig) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_z(config.tilt_degrees.to_radians())
            * Mat4::from_rotation_y(self.spin_angle)
            * Mat4::from_scale(Vec3::splat(config.size * self.scale))
    }
}

/// Run all render passes. Called from `ViewerState::render()`.
pub fn run(state: &mut ViewerState) -> Result<()> {
    let (output, mut encoder) = state.renderer.begin_frame()?;
    let scene_view = state.renderer.scene_view();
    let output_view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    state.renderer.update_camera(&state.camera);
    state
        .renderer
        .set_shadow_map_size(shadow_lod(state.camera.eye.length()));
    state.renderer.update_light(Vec3::ZERO, state.config.shadows);

    // ========== COLLECT ==========

    let selected = state.selection.as_ref().map(|s| s.planet);
    let camera_eye = state.camera.eye;

    let mut planet_draws: Vec<PlanetDraw> = Vec::with_capacity(PLANET_CONFIGS.len());
    for (_, (planet, orbit, spin)) in state.world.query::<(&Planet, &Orbit, &Spin)>().iter() {
        let scale = if selected == Some(planet.index) {
            SELECTION_SCALE
        } else {
            1.0
        };
        planet_draws.push(PlanetDraw {
            index: planet.index,
            position: orbit.position(),
            spin_angle: spin.angle,
            scale,
        });
    }
    planet_draws.sort_by_key(|draw| draw.index);

    let mut rock_instances: Vec<InstanceData> = Vec::with_capacity(state.config.belt_rock_count);
    let mut rock_casters: Vec<InstanceData> = Vec::new();
    for (_, rock) in state.world.query::<&BeltRock>().iter() {
        let position = rock.position();
        let model = Mat4::from_translation(position) * Mat4::from_scale(Vec3::splat(rock.size));
        let instance = InstanceData::new(model.to_cols_array_2d(), ROCK_COLOR);
        if position.distance(camera_eye) < ROCK_CASTER_RANGE {
            rock_casters.push(instance);
        }
        rock_instances.push(instance);
    }

    // Halo dots wheel about their planet; comet heads ride the travel line.
    let mut spark_instances: Vec<InstanceData> = Vec::new();
    for (_, (planet, orbit, halo)) in state.world.query::<(&Planet, &Orbit, &Halo)>().iter() {
        let scale = if selected == Some(planet.index) {
            SELECTION_SCALE
        } else {
            1.0
        };
        let center = orbit.position();
        let turn = Quat::from_rotation_y(halo.angle);
        for offset in &halo.offsets {
            let world = center + (turn * *offset) * scale;
            let model = Mat4::from_translation(world)
                * Mat4::from_scale(Vec3::splat(halo.dot_radius * scale));
            spark_instances.push(InstanceData::new(model.to_cols_array_2d(), HALO_DOT_COLOR));
        }
    }

    let mut line_batch = LineBatch::new();
    for (_, comet) in state.world.query::<&Comet>().iter() {
        let head = comet.position();
        let model =
            Mat4::from_translation(head) * Mat4::from_scale(Vec3::splat(COMET_HEAD_RADIUS));
        spark_instances.push(InstanceData::new(model.to_cols_array_2d(), COMET_HEAD_COLOR));

        let step = COMET_TAIL_LENGTH / COMET_TAIL_SEGMENTS as f32;
        let tail: Vec<([f32; 3], [f32; 4])> = (0..=COMET_TAIL_SEGMENTS)
            .map(|i| {
                let fade = 1.0 - i as f32 / COMET_TAIL_SEGMENTS as f32;
                let point = head - comet.direction * (step * i as f32);
                (
                    point.to_array(),
                    [
                        COMET_TAIL_COLOR[0],
                        COMET_TAIL_COLOR[1],
                        COMET_TAIL_COLOR[2],
                        fade,
                    ],
                )
            })
            .collect();
        line_batch.add_strip_faded(&tail);
    }

    for (index, config) in PLANET_CONFIGS.iter().enumerate() {
        let color = if state.hovered == Some(index) {
            ORBIT_LINE_HOVERED
        } else {
            ORBIT_LINE_COLOR
        };
        let points: Vec<[f32; 3]> = (0..ORBIT_LINE_SEGMENTS)
            .map(|i| {
                let angle = i as f32 / ORBIT_LINE_SEGMENTS as f32 * std::f32::consts::TAU;
                [
                    config.orbit_radius * angle.cos(),
                    0.0,
                    config.orbit_radius * angle.sin(),
                ]
            })
            .collect();
        line_batch.add_strip(&points, color, true);
    }

    // Selection swirl: jittered ellipses that follow the planet.
    if let Some(selection) = &state.selection {
        if let Some(draw) = planet_draws.iter().find(|d| d.index == selection.planet) {
            let center = draw.position;
            for ring in &selection.rings {
                let points: Vec<[f32; 3]> = (0..ring.jitter.len())
                    .map(|i| {
                        let angle = i as f32 / ring.jitter.len() as f32 * std::f32::consts::TAU;
                        [
                            center.x + ring.radius * angle.cos(),
                            center.y + ring.jitter[i],
                            center.z + ring.radius * ring.squash * angle.sin(),
                        ]
                    })
                    .collect();
                let color = [
                    SELECTION_RING_COLOR[0],
                    SELECTION_RING_COLOR[1],
                    SELECTION_RING_COLOR[2],
                    ring.alpha,
                ];
                line_batch.add_strip(&points, color, true);
            }
        }
    }

    // ========== SHADOW PASS ==========

    if !state.config.shadows {
        state.shadow_casting_count = 0;
    } else if state.time.frame_count() % SHADOW_INTERVAL == 0 {
        let mut planet_casters: Vec<InstanceData> = Vec::new();
        for draw in &planet_draws {
            let config = &PLANET_CONFIGS[draw.index];
            if config.size <= SHADOW_CASTER_MIN_SIZE {
                continue;
            }
            let model = draw.model(config);
            planet_casters.push(InstanceData::new(model.to_cols_array_2d(), [1.0; 4]));
        }
        state.shadow_casting_count = planet_casters.len() + rock_casters.len();

        let assets = &state.assets;
        state.renderer.with_shadow_pass(&mut encoder, |r, pass| {
            let mut offset = SHADOW_INSTANCE_OFFSET;
            r.render_shadow_instanced(pass, &assets.planet_mesh, &planet_casters, offset);
            offset += planet_casters.len() as u32;
            r.render_shadow_instanced(pass, &assets.rock_mesh, &rock_casters, offset);
        });
    }

    // ========== SCENE PASSES ==========

    state.renderer.render_stars(&mut encoder, &scene_view);

    let sun_model = Mat4::from_scale(Vec3::splat(SUN_RADIUS));
    state.renderer.render_body(
        &mut encoder,
        &scene_view,
        &state.assets.planet_mesh,
        Some(&state.assets.sun_texture),
        BodyInstance::emissive(sun_model, [1.0, 1.0, 1.0, 1.0]),
    );
    state.renderer.render_glow(
        &mut encoder,
        &scene_view,
        &state.assets.glow_mesh,
        BodyInstance::glow(
            Mat4::from_scale(Vec3::splat(SUN_CORONA_RADIUS)),
            CORONA_TINT,
            1.0,
        ),
    );

    for draw in &planet_draws {
        let config = &PLANET_CONFIGS[draw.index];
        state.renderer.render_body(
            &mut encoder,
            &scene_view,
            &state.assets.planet_mesh,
            Some(&state.assets.planet_textures[draw.index]),
            BodyInstance::lit(draw.model(config), [1.0, 1.0, 1.0, 1.0], true),
        );
    }

    for draw in &planet_draws {
        let Some((mesh, texture)) = &state.assets.rings[draw.index] else {
            continue;
        };
        // Radii are baked into the annulus; only the selection scale applies.
        let model = Mat4::from_translation(draw.position)
            * Mat4::from_rotation_z(PLANET_CONFIGS[draw.index].tilt_degrees.to_radians())
            * Mat4::from_scale(Vec3::splat(draw.scale));
        state.renderer.render_ring(
            &mut encoder,
            &scene_view,
            mesh,
            Some(texture),
            BodyInstance::ring(model, [1.0, 1.0, 1.0, 1.0]),
        );
    }

    for draw in &planet_draws {
        let config = &PLANET_CONFIGS[draw.index];
        let rim = [
            config.rim_color[0],
            config.rim_color[1],
            config.rim_color[2],
            1.0,
        ];
        let shell = Mat4::from_translation(draw.position)
            * Mat4::from_scale(Vec3::splat(config.size * draw.scale * 1.1));
        state.renderer.render_glow(
            &mut encoder,
            &scene_view,
            &state.assets.glow_mesh,
            BodyInstance::glow(shell, rim, 0.0),
        );
    }

    if let Some(hovered) = state.hovered {
        if let Some(draw) = planet_draws.iter().find(|d| d.index == hovered) {
            let shell = Mat4::from_translation(draw.position)
                * Mat4::from_scale(Vec3::splat(
                    PLANET_CONFIGS[hovered].size * draw.scale * 1.25,
                ));
            state.renderer.render_glow(
                &mut encoder,
                &scene_view,
                &state.assets.glow_mesh,
                BodyInstance::glow(shell, HOVER_SHELL_COLOR, 2.0),
            );
        }
    }

    state.renderer.render_rocks(
        &mut encoder,
        &scene_view,
        &state.assets.rock_mesh,
        &rock_instances,
    );
    state.renderer.render_sparks(
        &mut encoder,
        &scene_view,
        &state.assets.spark_mesh,
        &spark_instances,
    );
    state
        .renderer
        .render_lines(&mut encoder, &scene_view, &line_batch);

    // ========== POST & OVERLAY ==========

    let bloom_view = state.renderer.run_bloom_passes(&mut encoder, &scene_view);
    state
        .renderer
        .update_cinematic_uniform(state.time.elapsed_seconds());
    state
        .renderer
        .run_cinematic_pass(&mut encoder, &scene_view, &bloom_view, &output_view);

    let (sw, sh) = state.renderer.dimensions();
    let tb = overlay::build(state, sw as f32, sh as f32);
    state
        .renderer
        .render_overlay(&mut encoder, &output_view, &tb.vertices, &tb.indices);

    state.renderer.end_frame(output, encoder);
    Ok(())
}
