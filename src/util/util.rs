use ndarray::{Array2, Array3};

pub type Float = f32;
pub type Array2D = Array2< Float >;
pub type Array3D = Array3< Float >;
