use super::api::*;

/// Required attributes for the session's config, context and candidate query.
///
/// Keep this structure stable and minimal. Add fields only when a concrete
/// device or driver requirement exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInit {
    /// Minimum red channel depth in bits.
    pub red_bits: EglInt,
    /// Minimum green channel depth in bits.
    pub green_bits: EglInt,
    /// Minimum blue channel depth in bits.
    pub blue_bits: EglInt,

    /// Minimum alpha depth; `None` leaves alpha unconstrained.
    pub alpha_bits: Option<EglInt>,

    /// Requested client API version as `(major, minor)`.
    pub client_version: (EglInt, EglInt),

    /// Upper bound on candidate configs fetched from the platform.
    ///
    /// Candidates past this bound are never considered.
    pub max_candidates: usize,
}

impl Default for SessionInit {
    fn default() -> Self {
        Self {
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            alpha_bits: None,
            client_version: (2, 0),
            max_candidates: 32,
        }
    }
}

impl SessionInit {
    fn renderable_bit(&self) -> EglInt {
        if self.client_version.0 >= 3 {
            EGL_OPENGL_ES3_BIT
        } else {
            EGL_OPENGL_ES2_BIT
        }
    }

    /// `EGL_NONE`-terminated attribute list passed to `eglChooseConfig`.
    pub fn config_attribs(&self) -> Vec<EglInt> {
        let renderable = self.renderable_bit();
        let mut attribs = vec![
            EGL_SURFACE_TYPE,
            EGL_WINDOW_BIT,
            EGL_CONFORMANT,
            renderable,
            EGL_RENDERABLE_TYPE,
            renderable,
            EGL_COLOR_BUFFER_TYPE,
            EGL_RGB_BUFFER,
            EGL_RED_SIZE,
            self.red_bits,
            EGL_GREEN_SIZE,
            self.green_bits,
            EGL_BLUE_SIZE,
            self.blue_bits,
        ];
        if let Some(alpha) = self.alpha_bits {
            attribs.extend([EGL_ALPHA_SIZE, alpha]);
        }
        attribs.push(EGL_NONE);
        attribs
    }

    /// `EGL_NONE`-terminated attribute list passed to `eglCreateContext`.
    pub fn context_attribs(&self) -> Vec<EglInt> {
        let (major, minor) = self.client_version;
        vec![
            EGL_CONTEXT_MAJOR_VERSION,
            major,
            EGL_CONTEXT_MINOR_VERSION,
            minor,
            EGL_NONE,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_requests_window_es2_rgb888() {
        let attribs = SessionInit::default().config_attribs();
        assert_eq!(
            attribs,
            vec![
                EGL_SURFACE_TYPE, EGL_WINDOW_BIT,
                EGL_CONFORMANT, EGL_OPENGL_ES2_BIT,
                EGL_RENDERABLE_TYPE, EGL_OPENGL_ES2_BIT,
                EGL_COLOR_BUFFER_TYPE, EGL_RGB_BUFFER,
                EGL_RED_SIZE, 8,
                EGL_GREEN_SIZE, 8,
                EGL_BLUE_SIZE, 8,
                EGL_NONE,
            ]
        );
    }

    #[test]
    fn alpha_requirement_is_appended_before_terminator() {
        let init = SessionInit { alpha_bits: Some(8), ..SessionInit::default() };
        let attribs = init.config_attribs();
        assert_eq!(&attribs[attribs.len() - 3..], &[EGL_ALPHA_SIZE, 8, EGL_NONE]);
    }

    #[test]
    fn es3_uses_es3_renderable_bit() {
        let init = SessionInit { client_version: (3, 1), ..SessionInit::default() };
        let attribs = init.config_attribs();
        assert_eq!(attribs[3], EGL_OPENGL_ES3_BIT);
        assert_eq!(attribs[5], EGL_OPENGL_ES3_BIT);
        assert_eq!(
            init.context_attribs(),
            vec![EGL_CONTEXT_MAJOR_VERSION, 3, EGL_CONTEXT_MINOR_VERSION, 1, EGL_NONE]
        );
    }
}
