use std::cell::Cell;

#[derive(Clone, Copy)]
enum TraceState {
    Uninit,
    Enabled,
    Disabled,
}

thread_local! {
    static TRACE_STATE: Cell<TraceState> = const { Cell::new(TraceState::Uninit) };
}

#[inline(never)]
#[cold]
pub(crate) fn is_trace_enabled() -> bool {
    TRACE_STATE.with(|state| match state.get() {
        TraceState::Enabled => true,
        TraceState::Disabled => false,
        TraceState::Uninit => {
            let enabled = std::env::var_os("SPERR_TRACE").is_some();
            state.set(if enabled {
                TraceState::Enabled
            } else {
                TraceState::Disabled
            });
            enabled
        }
    })
}

/// Print to stderr if `SPERR_TRACE` is set.
macro_rules! trace {
    ($($arg:tt)*) => {{
        if $crate::tracing::is_trace_enabled() {
            eprintln!("[sperr] {}", format_args!($($arg)*))
        }
    }};
}
pub(crate) use trace;
