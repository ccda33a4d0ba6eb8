// Application layer: the editing session a grid UI drives.

pub mod session;
