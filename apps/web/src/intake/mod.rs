// User inputs: the uploaded PDF and its text, the client logo, and the
// multipart form that carries them.

pub mod inputs;
pub mod logo;
pub mod pdf;
