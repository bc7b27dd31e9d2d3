pub mod usecase;

#[cfg(test)]
pub mod test_helpers;
