mod trivia_vm;

pub use trivia_vm::{TriviaVm, ViewModelPresenter};
