//! Enumerazioni - Tipi enumerati utilizzati nelle entità

use serde::{Deserialize, Serialize};

// ********************* ENUMERAZIONI UTILI **********************//

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Text,
    Image,
    File,
    Gif,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ChatType {
    #[default]
    Public,
    Private,
}
