#[cfg(test)]
mod macros;
mod models;

#[cfg(test)]
pub(crate) use self::macros::each_capacity;
pub(crate) use self::models::sync;
