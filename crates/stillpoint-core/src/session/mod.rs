mod clock;
mod engine;
mod scheduler;
pub mod visual;

pub use clock::SessionClock;
pub use engine::{Frame, RunState, Session, TIMER_LABEL};
pub use scheduler::{PhaseScheduler, SessionProgress, StepOutcome, PHASE_EPSILON};
pub use visual::{PEAK_SCALE, REST_SCALE};
