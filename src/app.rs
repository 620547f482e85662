//! Frame driver tying the ECS world to the XR host, audio and asset loading.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedules;
use organ_console_assets::{AssetEvent, AssetLoader};
use organ_console_audio::{AudioManager, SoundId};
use organ_console_core::{FrameTick, Rgb};
use organ_console_ecs::{run_frame, SceneNode};
use organ_console_input::XrHost;
use organ_console_ui3d::ButtonState;
use tracing::{info, warn};

use crate::components::{Button, Controller};
use crate::config::ConsoleConfig;
use crate::resources::{
    AssetInbox, AudioRequests, ButtonLog, ButtonRecord, ExitSequence, FrameContext, LoadedAsset,
    OrganMaterial, SessionRequests, XrInput,
};
use crate::scene::{setup_scene, SceneHandles};
use crate::systems::console_schedules;

/// The organ console: one ECS world driven one frame at a time by an [`XrHost`].
pub struct ConsoleApp<H: XrHost> {
    world: World,
    schedules: Schedules,
    host: H,
    audio: AudioManager,
    loader: AssetLoader,
    config: ConsoleConfig,
    handles: SceneHandles,
    tick: FrameTick,
    session_end_requested: bool,
}

impl<H: XrHost> ConsoleApp<H> {
    /// Build the scene and start loading the model and texture in the background.
    pub fn new(config: ConsoleConfig, host: H, mut audio: AudioManager) -> Self {
        let mut world = World::default();
        let handles = setup_scene(&mut world, &config);

        let mut loader = AssetLoader::new();
        if let Some(model) = &config.assets.model {
            loader.request_model(model);
        }
        if let Some(texture) = &config.assets.texture {
            loader.request_texture(texture);
        }
        audio.set_settings(&config.audio.settings);

        info!(buttons = handles.buttons.len(), "console scene ready");
        Self {
            world,
            schedules: console_schedules(),
            host,
            audio,
            loader,
            config,
            handles,
            tick: FrameTick::ZERO,
            session_end_requested: false,
        }
    }

    /// Run one frame `dt` seconds after the previous one.
    ///
    /// Returns the button edges fired during the frame.
    pub fn frame(&mut self, dt: f32) -> Vec<ButtonRecord> {
        let frame = self.host.poll_frame(dt);
        self.world.resource_mut::<XrInput>().0.update(&frame);
        {
            let mut ctx = self.world.resource_mut::<FrameContext>();
            ctx.frame = frame;
            ctx.dt = dt;
            ctx.tick = self.tick;
        }

        self.collect_assets();
        run_frame(&mut self.world, &mut self.schedules, self.tick);
        self.flush_audio();
        self.flush_session();

        self.tick = self.tick.advance(1);
        std::mem::take(&mut self.world.resource_mut::<ButtonLog>().0)
    }

    fn collect_assets(&mut self) {
        for event in self.loader.poll() {
            match event {
                AssetEvent::ModelLoaded { path, model } => {
                    info!(path = %path.display(), meshes = model.meshes.len(), "model loaded");
                    self.world
                        .resource_mut::<AssetInbox>()
                        .0
                        .push(LoadedAsset::Model(model));
                }
                AssetEvent::TextureLoaded { path, texture } => {
                    info!(path = %path.display(), "texture loaded");
                    self.world
                        .resource_mut::<AssetInbox>()
                        .0
                        .push(LoadedAsset::Texture(texture));
                }
                AssetEvent::Failed { path, kind, error } => {
                    warn!(path = %path.display(), ?kind, %error, "asset failed to load");
                }
            }
        }
    }

    fn flush_audio(&mut self) {
        let mut requests = self.world.resource_mut::<AudioRequests>();
        if requests.bind_now {
            requests.bind_now = false;
            self.audio
                .load_sound_async(SoundId::ButtonPress, &self.config.audio.press_sound);
            self.audio
                .load_sound_async(SoundId::ButtonRelease, &self.config.audio.release_sound);
        }
        if let Some(listener) = requests.listener.take() {
            self.audio.set_listener_position(listener);
        }
        let plays = std::mem::take(&mut requests.plays);

        self.audio.update();
        for sound in plays {
            self.audio.play_sfx(sound);
        }
    }

    fn flush_session(&mut self) {
        let mut session = self.world.resource_mut::<SessionRequests>();
        if std::mem::take(&mut session.end_session) {
            self.host.end_session();
            self.session_end_requested = true;
        }
    }

    /// The host has run out of frames.
    pub fn is_finished(&self) -> bool {
        self.host.is_finished()
    }

    /// The console has asked the host to end the session.
    pub fn session_end_requested(&self) -> bool {
        self.session_end_requested
    }

    /// Next frame to run.
    pub fn tick(&self) -> FrameTick {
        self.tick
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    pub fn handles(&self) -> &SceneHandles {
        &self.handles
    }

    fn button_entity(&self, name: &str) -> Option<Entity> {
        self.handles.buttons.iter().copied().find(|&entity| {
            self.world
                .get::<Button>(entity)
                .is_some_and(|button| button.name == name)
        })
    }

    /// Committed state of the named button.
    pub fn button_state(&self, name: &str) -> Option<ButtonState> {
        let entity = self.button_entity(name)?;
        self.world.get::<Button>(entity).map(|b| b.machine.state())
    }

    /// Local height of the named button.
    pub fn button_y(&self, name: &str) -> Option<f32> {
        let entity = self.button_entity(name)?;
        self.world.get::<SceneNode>(entity).map(|n| n.translation.y)
    }

    /// Pointer line length of controller `index` (0 = left).
    pub fn pointer_length(&self, index: usize) -> Option<f32> {
        let entity = *self.handles.controllers.get(index)?;
        self.world.get::<Controller>(entity).map(|c| c.line_length)
    }

    pub fn exit_banner_visible(&self) -> bool {
        self.world.resource::<ExitSequence>().banner_visible
    }

    pub fn model_tint(&self) -> Rgb {
        self.world.resource::<OrganMaterial>().tint
    }

    pub fn model_texture(&self) -> Option<(u32, u32)> {
        self.world.resource::<OrganMaterial>().texture
    }

    /// Background loads not yet collected.
    pub fn assets_in_flight(&self) -> usize {
        self.loader.in_flight()
    }
}
