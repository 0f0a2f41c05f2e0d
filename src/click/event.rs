/// A click delivered in the capture phase, with the two flags a listener may
/// set on it.
#[derive(Debug, Clone)]
pub struct ClickEvent<N> {
    target: N,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl<N> ClickEvent<N> {
    pub fn new(target: N) -> Self {
        Self {
            target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn target(&self) -> &N {
        &self.target
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
