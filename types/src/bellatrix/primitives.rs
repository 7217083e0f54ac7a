use ssz_types::VariableList;

use crate::preset::Preset;

pub type Transaction<P> = VariableList<u8, <P as Preset>::MaxBytesPerTransaction>;
