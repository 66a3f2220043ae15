pub mod pointer_interaction;
