//! Looping audio channels
//!
//! The game never decodes or owns audio streams. The host hands it up to three
//! looping players (ambient music, running footsteps, rain) and the simulation
//! only tells them to play or pause. A channel that failed to load is simply
//! absent and every directive to it is a no-op.

use serde::{Deserialize, Serialize};

/// Capabilities the game needs from a looping audio player
pub trait AudioChannel {
    fn play(&mut self);
    fn pause(&mut self);
    fn is_playing(&self) -> bool;
    /// Volume in 0.0 - 1.0
    fn set_volume(&mut self, volume: f32);
}

/// The three looping channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Background music, plays for the whole session
    Ambient,
    /// Footsteps while the cat is on the ground
    Run,
    /// Rain ambience
    Rain,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Ambient, Channel::Run, Channel::Rain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Ambient => "ambient",
            Channel::Run => "run",
            Channel::Rain => "rain",
        }
    }
}

/// Per-channel volume levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelVolumes {
    pub ambient: f32,
    pub run: f32,
    pub rain: f32,
}

impl Default for ChannelVolumes {
    fn default() -> Self {
        Self {
            ambient: 0.3,
            run: 0.15,
            rain: 0.15,
        }
    }
}

impl ChannelVolumes {
    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Ambient => self.ambient,
            Channel::Run => self.run,
            Channel::Rain => self.rain,
        }
    }

    /// Scale every channel by a master level (clamped to 0.0 - 1.0)
    pub fn scaled(&self, master: f32) -> Self {
        let master = master.clamp(0.0, 1.0);
        Self {
            ambient: (self.ambient * master).clamp(0.0, 1.0),
            run: (self.run * master).clamp(0.0, 1.0),
            rain: (self.rain * master).clamp(0.0, 1.0),
        }
    }
}

/// The set of optional channel handles owned by a game instance
#[derive(Default)]
pub struct AudioChannels {
    ambient: Option<Box<dyn AudioChannel>>,
    run: Option<Box<dyn AudioChannel>>,
    rain: Option<Box<dyn AudioChannel>>,
    volumes: ChannelVolumes,
}

impl std::fmt::Debug for AudioChannels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioChannels")
            .field("ambient", &self.ambient.is_some())
            .field("run", &self.run.is_some())
            .field("rain", &self.rain.is_some())
            .field("volumes", &self.volumes)
            .finish()
    }
}

impl AudioChannels {
    /// No audio at all
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn new(volumes: ChannelVolumes) -> Self {
        Self {
            volumes,
            ..Self::default()
        }
    }

    /// Attach a player to a channel (replaces any previous one)
    pub fn with(mut self, channel: Channel, player: Box<dyn AudioChannel>) -> Self {
        *self.slot_mut(channel) = Some(player);
        self
    }

    pub fn volumes(&self) -> ChannelVolumes {
        self.volumes
    }

    pub fn is_present(&self, channel: Channel) -> bool {
        self.slot(channel).is_some()
    }

    fn slot(&self, channel: Channel) -> &Option<Box<dyn AudioChannel>> {
        match channel {
            Channel::Ambient => &self.ambient,
            Channel::Run => &self.run,
            Channel::Rain => &self.rain,
        }
    }

    fn slot_mut(&mut self, channel: Channel) -> &mut Option<Box<dyn AudioChannel>> {
        match channel {
            Channel::Ambient => &mut self.ambient,
            Channel::Run => &mut self.run,
            Channel::Rain => &mut self.rain,
        }
    }

    /// Set every present channel to its volume and start it looping
    pub fn start_all(&mut self) {
        for channel in Channel::ALL {
            let volume = self.volumes.get(channel);
            match self.slot_mut(channel) {
                Some(player) => {
                    player.set_volume(volume);
                    player.play();
                }
                None => log::warn!("No {} audio - channel silent", channel.as_str()),
            }
        }
    }

    /// False for an absent channel
    pub fn is_playing(&self, channel: Channel) -> bool {
        self.slot(channel).as_ref().is_some_and(|p| p.is_playing())
    }

    pub fn pause_if_playing(&mut self, channel: Channel) {
        if let Some(player) = self.slot_mut(channel) {
            if player.is_playing() {
                player.pause();
            }
        }
    }

    pub fn resume_if_paused(&mut self, channel: Channel) {
        if let Some(player) = self.slot_mut(channel) {
            if !player.is_playing() {
                player.play();
            }
        }
    }

    /// Move the handles out, leaving this set silent
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Observable state of a `RecordingChannel`
    #[derive(Debug, Default, Clone)]
    pub struct ChannelLog {
        pub playing: bool,
        pub volume: f32,
        pub plays: u32,
        pub pauses: u32,
    }

    /// Test player that records every directive
    #[derive(Clone, Default)]
    pub struct RecordingChannel(pub Rc<RefCell<ChannelLog>>);

    impl RecordingChannel {
        pub fn log(&self) -> ChannelLog {
            self.0.borrow().clone()
        }
    }

    impl AudioChannel for RecordingChannel {
        fn play(&mut self) {
            let mut log = self.0.borrow_mut();
            log.playing = true;
            log.plays += 1;
        }

        fn pause(&mut self) {
            let mut log = self.0.borrow_mut();
            log.playing = false;
            log.pauses += 1;
        }

        fn is_playing(&self) -> bool {
            self.0.borrow().playing
        }

        fn set_volume(&mut self, volume: f32) {
            self.0.borrow_mut().volume = volume;
        }
    }

    /// All three channels present, plus handles to inspect them
    pub fn recorded_channels() -> (AudioChannels, [RecordingChannel; 3]) {
        let ambient = RecordingChannel::default();
        let run = RecordingChannel::default();
        let rain = RecordingChannel::default();
        let channels = AudioChannels::new(ChannelVolumes::default())
            .with(Channel::Ambient, Box::new(ambient.clone()))
            .with(Channel::Run, Box::new(run.clone()))
            .with(Channel::Rain, Box::new(rain.clone()));
        (channels, [ambient, run, rain])
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_start_all_sets_volume_and_plays() {
        let (mut channels, [ambient, run, rain]) = recorded_channels();
        channels.start_all();
        assert!(ambient.log().playing);
        assert_eq!(ambient.log().volume, 0.3);
        assert_eq!(run.log().volume, 0.15);
        assert_eq!(rain.log().volume, 0.15);
        assert!(channels.is_playing(Channel::Rain));
    }

    #[test]
    fn test_absent_channel_is_inert() {
        let mut channels = AudioChannels::silent();
        channels.start_all();
        channels.pause_if_playing(Channel::Run);
        channels.resume_if_paused(Channel::Run);
        assert!(!channels.is_present(Channel::Run));
        assert!(!channels.is_playing(Channel::Run));
    }

    #[test]
    fn test_pause_and_resume_are_conditional() {
        let (mut channels, [_, run, _]) = recorded_channels();
        channels.pause_if_playing(Channel::Run);
        assert_eq!(run.log().pauses, 0);

        channels.start_all();
        channels.pause_if_playing(Channel::Run);
        channels.pause_if_playing(Channel::Run);
        assert_eq!(run.log().pauses, 1);

        channels.resume_if_paused(Channel::Run);
        channels.resume_if_paused(Channel::Run);
        assert_eq!(run.log().plays, 2);
    }

    #[test]
    fn test_take_leaves_silence() {
        let (mut channels, _) = recorded_channels();
        let moved = channels.take();
        assert!(moved.is_present(Channel::Ambient));
        assert!(!channels.is_present(Channel::Ambient));
    }

    #[test]
    fn test_master_scaling_clamps() {
        let v = ChannelVolumes::default().scaled(2.0);
        assert_eq!(v, ChannelVolumes::default());
        let v = ChannelVolumes::default().scaled(0.5);
        assert_eq!(v.ambient, 0.15);
    }
}
