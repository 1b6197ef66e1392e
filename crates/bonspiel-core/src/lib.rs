pub mod command;
pub mod events;
pub mod input;
pub mod stone;
pub mod team;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::command::{CurlDirection, ThrowCommand};
    use crate::input::{InputCollaborator, ThrowContext};
    use crate::team::Team;

    /// A request the engine made on an input collaborator, in arrival order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum InputRequest {
        ThrowRequested(ThrowContext),
        SweepStarted(Team),
        SweepEnded(Team),
    }

    /// Shared log of input requests, readable from the test while the
    /// engine owns the collaborator.
    pub type RequestLog = Rc<RefCell<Vec<InputRequest>>>;

    /// A collaborator that records every request it receives.
    pub struct RecordingCollaborator {
        log: RequestLog,
    }

    impl RecordingCollaborator {
        /// Create a recorder and the log handle the test keeps.
        pub fn new() -> (Self, RequestLog) {
            let log: RequestLog = Rc::new(RefCell::new(Vec::new()));
            (
                Self {
                    log: Rc::clone(&log),
                },
                log,
            )
        }
    }

    impl InputCollaborator for RecordingCollaborator {
        fn begin_throw_input(&mut self, ctx: ThrowContext) {
            self.log.borrow_mut().push(InputRequest::ThrowRequested(ctx));
        }

        fn begin_sweep_input(&mut self, team: Team) {
            self.log.borrow_mut().push(InputRequest::SweepStarted(team));
        }

        fn end_sweep_input(&mut self, team: Team) {
            self.log.borrow_mut().push(InputRequest::SweepEnded(team));
        }
    }

    /// The most recent throw request in the log, if any.
    pub fn last_throw_request(log: &RequestLog) -> Option<ThrowContext> {
        log.borrow().iter().rev().find_map(|req| match req {
            InputRequest::ThrowRequested(ctx) => Some(*ctx),
            _ => None,
        })
    }

    /// A straight centerline throw at the given power, in-turn handle.
    pub fn make_throw(team: Team, power: f32, throw_index: u8) -> ThrowCommand {
        ThrowCommand::new(team, power, 0.0, CurlDirection::InTurn, throw_index)
    }
}
