//! Task catalog
//!
//! One file per task kind. Each task captures its exact inputs at
//! construction and mutates the player context only from `execute` on the
//! worker thread.

mod attach_samples;
mod check_audio_underflow;
mod enough_data;
mod finish_setup_source;
mod need_data;
mod pause;
mod play;
mod report_position;
mod setup_source;
mod shutdown;
mod stop;
mod underflow;
mod update_audio_format;
mod update_playback_group;
mod update_video_format;

pub(crate) use attach_samples::AttachSamples;
pub(crate) use check_audio_underflow::CheckAudioUnderflow;
pub(crate) use enough_data::EnoughData;
pub(crate) use finish_setup_source::FinishSetupSource;
pub(crate) use need_data::NeedData;
pub(crate) use pause::Pause;
pub(crate) use play::Play;
pub(crate) use report_position::ReportPosition;
pub(crate) use setup_source::SetupSource;
pub(crate) use shutdown::Shutdown;
pub(crate) use stop::Stop;
pub(crate) use underflow::Underflow;
pub(crate) use update_audio_format::UpdateAudioFormat;
pub(crate) use update_playback_group::UpdatePlaybackGroup;
pub(crate) use update_video_format::UpdateVideoFormat;
