mod login;
pub use login::Login;

mod notes;
pub use notes::Notes;

mod session_gate;
pub use session_gate::SessionGate;
