use super::api::*;
use super::{SessionError, SessionInit};

/// The framebuffer config chosen for a display connection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SurfaceConfig {
    handle: Config,

    /// Position among the candidates returned by the platform.
    pub index: usize,

    /// Multisample sample count (`EGL_SAMPLES`).
    pub samples: EglInt,

    pub red_bits: EglInt,
    pub green_bits: EglInt,
    pub blue_bits: EglInt,
    pub alpha_bits: EglInt,
}

impl SurfaceConfig {
    pub fn handle(&self) -> Config {
        self.handle
    }
}

/// Picks the candidate with the highest sample count.
///
/// Ties resolve to the first occurrence so selection is stable for a given
/// platform ordering. Returns `None` only for an empty slice.
pub fn best_sample_index(samples: &[EglInt]) -> Option<usize> {
    let mut best: Option<(usize, EglInt)> = None;
    for (index, &count) in samples.iter().enumerate() {
        match best {
            Some((_, max)) if count <= max => {}
            _ => best = Some((index, count)),
        }
    }
    best.map(|(index, _)| index)
}

/// Queries at most `init.max_candidates` configs matching `init` and selects the
/// one with the most MSAA samples.
pub fn select_config<E>(
    egl: &E,
    display: Display,
    init: &SessionInit,
) -> Result<SurfaceConfig, SessionError>
where
    E: Egl + ?Sized,
{
    let candidates = egl
        .choose_config(display, &init.config_attribs(), init.max_candidates)
        .map_err(SessionError::ChooseConfig)?;

    let samples = candidates
        .iter()
        .map(|&config| egl.config_attrib(display, config, EGL_SAMPLES))
        .collect::<Result<Vec<_>, _>>()
        .map_err(SessionError::ConfigAttrib)?;

    let index = best_sample_index(&samples).ok_or(SessionError::NoMatchingConfig)?;
    let handle = candidates[index];

    let attrib = |attribute| {
        egl.config_attrib(display, handle, attribute)
            .map_err(SessionError::ConfigAttrib)
    };

    let config = SurfaceConfig {
        handle,
        index,
        samples: samples[index],
        red_bits: attrib(EGL_RED_SIZE)?,
        green_bits: attrib(EGL_GREEN_SIZE)?,
        blue_bits: attrib(EGL_BLUE_SIZE)?,
        alpha_bits: attrib(EGL_ALPHA_SIZE)?,
    };

    log::debug!(
        "selected EGL config {} of {} (samples={}, rgba={}/{}/{}/{})",
        config.index,
        candidates.len(),
        config.samples,
        config.red_bits,
        config.green_bits,
        config.blue_bits,
        config.alpha_bits,
    );

    Ok(config)
}
