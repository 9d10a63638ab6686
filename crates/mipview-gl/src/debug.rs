use glow::HasContext;

/// Routes driver debug messages (GL 4.3 / KHR_debug) into the log. A no-op on
/// drivers without debug output.
pub fn install_callback(gl: &mut glow::Context) {
    if !gl.supports_debug() {
        log::debug!("GL debug output not supported");
        return;
    }

    unsafe {
        gl.enable(glow::DEBUG_OUTPUT);
        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback(|source, kind, id, severity, message| {
            let level = severity_level(severity);
            log::log!(level, "GL [{}/{kind:#x}/{id}] {message}", source_name(source));
        });
    }
}

pub fn severity_level(severity: u32) -> log::Level {
    match severity {
        glow::DEBUG_SEVERITY_HIGH => log::Level::Error,
        glow::DEBUG_SEVERITY_MEDIUM => log::Level::Warn,
        glow::DEBUG_SEVERITY_LOW => log::Level::Debug,
        _ => log::Level::Trace,
    }
}

fn source_name(source: u32) -> &'static str {
    match source {
        glow::DEBUG_SOURCE_API => "api",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "window",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "shader",
        glow::DEBUG_SOURCE_THIRD_PARTY => "third-party",
        glow::DEBUG_SOURCE_APPLICATION => "app",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_level() {
        assert_eq!(severity_level(glow::DEBUG_SEVERITY_HIGH), log::Level::Error);
        assert_eq!(severity_level(glow::DEBUG_SEVERITY_MEDIUM), log::Level::Warn);
        assert_eq!(severity_level(glow::DEBUG_SEVERITY_LOW), log::Level::Debug);
        assert_eq!(severity_level(glow::DEBUG_SEVERITY_NOTIFICATION), log::Level::Trace);
    }

    #[test]
    fn test_source_name() {
        assert_eq!(source_name(glow::DEBUG_SOURCE_SHADER_COMPILER), "shader");
        assert_eq!(source_name(0), "other");
    }
}
