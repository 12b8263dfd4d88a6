use anyhow::{Context, Result};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

#[derive(Clone, Debug)]
pub struct EncoderSettings {
    pub output: PathBuf,
    /// Track muxed in as the video's soundtrack
    pub audio: PathBuf,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub codec: String,
    pub pix_fmt: String,
    pub crf: u32,
    pub bitrate: Option<String>,
}

impl EncoderSettings {
    fn args(&self) -> Vec<OsString> {
        let mut args = vec![OsString::from("-y")];
        let mut opt = |flag: &str, value: OsString| {
            args.push(flag.into());
            args.push(value);
        };

        opt("-f", "rawvideo".into());
        opt("-pixel_format", "rgba".into());
        opt("-video_size", format!("{}x{}", self.width, self.height).into());
        opt("-framerate", self.fps.to_string().into());
        opt("-i", "pipe:0".into());
        opt("-i", self.audio.clone().into_os_string());
        opt("-c:v", self.codec.clone().into());
        opt("-pix_fmt", self.pix_fmt.clone().into());

        match self.bitrate {
            Some(ref br) => opt("-b:v", br.clone().into()),
            None => {
                opt("-crf", self.crf.to_string().into());
                opt("-preset", "medium".into());
            }
        }

        opt("-c:a", "aac".into());
        opt("-b:a", "192k".into());

        args.push("-shortest".into());
        args.push(self.output.clone().into_os_string());
        args
    }
}

/// ffmpeg child process fed raw RGBA frames over stdin.
pub struct FfmpegEncoder {
    child: Child,
    frame_bytes: usize,
    frames_written: u64,
}

impl FfmpegEncoder {
    pub fn new(settings: &EncoderSettings) -> Result<Self> {
        let child = Command::new("ffmpeg")
            .args(settings.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn ffmpeg. Is ffmpeg installed?")?;

        log::info!(
            "FFmpeg encoder started: {}x{} @ {}fps, codec={}",
            settings.width,
            settings.height,
            settings.fps,
            settings.codec
        );

        Ok(Self {
            child,
            frame_bytes: (settings.width * settings.height * 4) as usize,
            frames_written: 0,
        })
    }

    pub fn write_frame(&mut self, rgba_pixels: &[u8]) -> Result<()> {
        if rgba_pixels.len() != self.frame_bytes {
            anyhow::bail!(
                "Frame is {} bytes, encoder expects {}",
                rgba_pixels.len(),
                self.frame_bytes
            );
        }
        let stdin = self.child.stdin.as_mut().context("FFmpeg stdin not available")?;
        stdin
            .write_all(rgba_pixels)
            .context("Failed to write frame to ffmpeg")?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        // Closing stdin signals end of stream
        drop(self.child.stdin.take());

        let output = self
            .child
            .wait_with_output()
            .context("Failed to wait for ffmpeg")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("FFmpeg exited with error:\n{}", stderr);
        }

        log::info!("FFmpeg encoding complete ({} frames)", self.frames_written);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> EncoderSettings {
        EncoderSettings {
            output: PathBuf::from("out.mp4"),
            audio: PathBuf::from("song.mp3"),
            width: 500,
            height: 500,
            fps: 60,
            codec: "libx264".into(),
            pix_fmt: "yuv420p".into(),
            crf: 18,
            bitrate: None,
        }
    }

    fn arg_after(args: &[OsString], flag: &str) -> Option<String> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(|a| a.to_string_lossy().into_owned())
    }

    #[test]
    fn crf_mode_by_default() {
        let args = settings().args();
        assert_eq!(arg_after(&args, "-video_size").as_deref(), Some("500x500"));
        assert_eq!(arg_after(&args, "-framerate").as_deref(), Some("60"));
        assert_eq!(arg_after(&args, "-crf").as_deref(), Some("18"));
        assert!(arg_after(&args, "-b:v").is_none());
        assert_eq!(args.last().map(|a| a.to_string_lossy().into_owned()).as_deref(), Some("out.mp4"));
    }

    #[test]
    fn bitrate_replaces_crf() {
        let args = EncoderSettings {
            bitrate: Some("5M".into()),
            ..settings()
        }
        .args();
        assert_eq!(arg_after(&args, "-b:v").as_deref(), Some("5M"));
        assert!(arg_after(&args, "-crf").is_none());
    }

    #[test]
    fn soundtrack_is_second_input() {
        let args = settings().args();
        let inputs: Vec<_> = args
            .iter()
            .enumerate()
            .filter(|(_, a)| *a == "-i")
            .filter_map(|(i, _)| args.get(i + 1))
            .collect();
        assert_eq!(inputs, vec!["pipe:0", "song.mp3"]);
        assert!(args.iter().any(|a| a == "-shortest"));
    }
}
