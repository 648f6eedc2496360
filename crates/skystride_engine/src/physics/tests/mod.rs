//! Multi-frame scenarios running the integrator and the resolver together
