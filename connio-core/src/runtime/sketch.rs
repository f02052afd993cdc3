//! Setup/loop runner

/// Application entry points
///
/// `C` is whatever the application drives, usually an [`Io`](crate::Io).
pub trait Sketch<C: ?Sized> {
    /// Called once before the first loop iteration
    fn setup(&mut self, ctx: &mut C);

    /// Called repeatedly after setup
    fn run_loop(&mut self, ctx: &mut C);

    /// Called after every loop iteration to service serial input
    fn serial_event(&mut self, _ctx: &mut C) {}
}

/// Drives a [`Sketch`] against its context
pub struct Runner<S, C> {
    sketch: S,
    ctx: C,
    setup_done: bool,
    iterations: u32,
}

impl<S: Sketch<C>, C> Runner<S, C> {
    /// Create a runner; nothing runs until [`run`](Self::run) or
    /// [`run_iterations`](Self::run_iterations)
    pub fn new(sketch: S, ctx: C) -> Self {
        Self {
            sketch,
            ctx,
            setup_done: false,
            iterations: 0,
        }
    }

    fn ensure_setup(&mut self) {
        if !self.setup_done {
            debug!("running setup");
            self.sketch.setup(&mut self.ctx);
            self.setup_done = true;
        }
    }

    fn iterate(&mut self) {
        self.sketch.run_loop(&mut self.ctx);
        self.sketch.serial_event(&mut self.ctx);
        self.iterations = self.iterations.wrapping_add(1);
    }

    /// Run setup once, then the loop forever
    pub fn run(mut self) -> ! {
        self.ensure_setup();
        loop {
            self.iterate();
        }
    }

    /// Run setup if it has not run yet, then `count` loop iterations
    pub fn run_iterations(&mut self, count: u32) {
        self.ensure_setup();
        for _ in 0..count {
            self.iterate();
        }
    }

    /// Loop iterations completed (wrapping)
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Get the sketch
    pub fn sketch(&self) -> &S {
        &self.sketch
    }

    /// Get the context
    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Get the context mutably
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    /// Consume the runner, returning the sketch and context
    pub fn into_parts(self) -> (S, C) {
        (self.sketch, self.ctx)
    }
}
