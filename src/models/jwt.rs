use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub iat: usize,
    pub exp: usize,
}
