use std::fmt;
use std::str::FromStr;

/// How the grid is handed to the GPU each frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum RenderMode {
    /// Coordinates recomputed and emitted every frame.
    #[default]
    Immediate,
    /// Stored vertices, walked by address every frame.
    CachedVertices,
    /// Stored vertices and indices, walked by index every frame.
    CachedVertexIndices,
    /// Host arrays re-sent every frame, drawn indexed per column.
    VertexArray,
    /// Device buffers uploaded once, drawn indexed per column.
    VertexBufferObject,
}

impl RenderMode {
    /// All modes in cycling order.
    pub const ALL: [RenderMode; 5] = [
        RenderMode::Immediate,
        RenderMode::CachedVertices,
        RenderMode::CachedVertexIndices,
        RenderMode::VertexArray,
        RenderMode::VertexBufferObject,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    /// The next mode, wrapping after the last.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            RenderMode::Immediate => "immediate",
            RenderMode::CachedVertices => "cached-vertices",
            RenderMode::CachedVertexIndices => "cached-vertex-indices",
            RenderMode::VertexArray => "vertex-array",
            RenderMode::VertexBufferObject => "vertex-buffer-object",
        }
    }

    /// Short alias accepted on the command line.
    pub fn short(self) -> &'static str {
        match self {
            RenderMode::Immediate => "im",
            RenderMode::CachedVertices => "sa",
            RenderMode::CachedVertexIndices => "sai",
            RenderMode::VertexArray => "va",
            RenderMode::VertexBufferObject => "vbo",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unrecognized render mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError {
    pub input: String,
}

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown render mode '{}'; expected one of ", self.input)?;
        for (i, m) in RenderMode::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} ({})", m.label(), m.short())?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for RenderMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('_', "-");
        RenderMode::ALL
            .into_iter()
            .find(|m| m.label() == needle || m.short() == needle)
            .ok_or_else(|| ParseModeError { input: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_visits_every_mode_then_wraps() {
        let mut m = RenderMode::default();
        let mut seen = vec![m];
        for _ in 0..4 {
            m = m.next();
            seen.push(m);
        }
        assert_eq!(seen, RenderMode::ALL.to_vec());
        assert_eq!(m.next(), RenderMode::Immediate);
    }

    #[test]
    fn index_round_trips() {
        for m in RenderMode::ALL {
            assert_eq!(RenderMode::from_index(m.index()), Some(m));
        }
        assert_eq!(RenderMode::from_index(5), None);
    }

    #[test]
    fn parses_labels_and_aliases() {
        assert_eq!("vbo".parse(), Ok(RenderMode::VertexBufferObject));
        assert_eq!("Cached_Vertices".parse(), Ok(RenderMode::CachedVertices));
        assert_eq!(" sai ".parse(), Ok(RenderMode::CachedVertexIndices));
        assert_eq!("vertex-array".parse(), Ok(RenderMode::VertexArray));
    }

    #[test]
    fn parse_error_lists_modes() {
        let err = "fast".parse::<RenderMode>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'fast'"));
        assert!(msg.contains("immediate (im)"));
    }
}
