use serde::{Deserialize, Serialize};


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Force {
    White,
    Black,
}

// Who may initiate moves on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovableForces {
    White,
    Black,
    Both,
    None,
}

impl Force {
    pub fn opponent(self) -> Force {
        match self {
            Force::White => Force::Black,
            Force::Black => Force::White,
        }
    }
}

impl MovableForces {
    pub fn includes(self, force: Force) -> bool {
        match self {
            MovableForces::Both => true,
            MovableForces::None => false,
            MovableForces::White | MovableForces::Black => self.single() == Some(force),
        }
    }

    // The force that is restricted to its own turn, i.e. the one that can premove.
    pub fn single(self) -> Option<Force> {
        match self {
            MovableForces::White => Some(Force::White),
            MovableForces::Black => Some(Force::Black),
            MovableForces::Both | MovableForces::None => None,
        }
    }
}
