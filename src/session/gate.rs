use std::sync::{Mutex, MutexGuard, PoisonError};

/// Result of handing a request to a [`SingleFlight`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    /// The caller ran this many jobs: its own request plus any that queued meanwhile.
    Ran(usize),
    /// Another caller is running; the request now sits in the single pending slot.
    Queued,
    /// The gate was closed; the request was discarded.
    Closed,
}

#[derive(Debug)]
struct GateState<R> {
    in_flight: bool,
    closed: bool,
    pending: Option<R>,
    dropped: u64,
}

/// At most one job in flight; at most one request pending, latest wins.
///
/// The caller that finds the gate idle runs its job and then drains the pending slot before
/// returning. Callers that find it busy overwrite the slot and return immediately.
#[derive(Debug)]
pub struct SingleFlight<R> {
    state: Mutex<GateState<R>>,
}

impl<R> Default for SingleFlight<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> SingleFlight<R> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState {
                in_flight: false,
                closed: false,
                pending: None,
                dropped: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GateState<R>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn run<F>(&self, request: R, mut job: F) -> GateOutcome
    where
        F: FnMut(R),
    {
        {
            let mut st = self.lock();
            if st.closed {
                return GateOutcome::Closed;
            }
            if st.in_flight {
                if st.pending.replace(request).is_some() {
                    st.dropped += 1;
                }
                return GateOutcome::Queued;
            }
            st.in_flight = true;
        }

        let mut guard = FlightGuard {
            gate: self,
            armed: true,
        };
        let mut next = request;
        let mut runs = 0;
        loop {
            job(next);
            runs += 1;
            let mut st = self.lock();
            match st.pending.take() {
                Some(r) => next = r,
                None => {
                    st.in_flight = false;
                    break;
                }
            }
        }
        guard.armed = false;
        GateOutcome::Ran(runs)
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock().in_flight
    }

    pub fn has_pending(&self) -> bool {
        self.lock().pending.is_some()
    }

    /// Pending requests overwritten before they could run.
    pub fn dropped(&self) -> u64 {
        self.lock().dropped
    }

    /// Reject further requests and discard the pending one. A job already running finishes.
    pub fn close(&self) {
        let mut st = self.lock();
        st.closed = true;
        st.pending = None;
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

/// Resets the gate if a job unwinds, so the curve is not wedged forever.
struct FlightGuard<'a, R> {
    gate: &'a SingleFlight<R>,
    armed: bool,
}

impl<R> Drop for FlightGuard<'_, R> {
    fn drop(&mut self) {
        if self.armed {
            let mut st = self.gate.lock();
            st.in_flight = false;
            st.pending = None;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/gate.rs"]
mod tests;
