macro_rules! each_capacity {
  ($name:ident => $expr:expr) => {
    #[cfg(any(coverage, coverage_nightly, miri))]
    {
      $crate::utils::each_capacity!(
        @impl $name => $expr,
        0, 4, 10,
      );
    }

    #[cfg(not(any(coverage, coverage_nightly, miri)))]
    {
      $crate::utils::each_capacity!(
        @impl $name => $expr,
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16,
      );
    }
  };
  (@impl $name:ident => $expr:expr, $($bits:expr),+ $(,)?) => {
    $(
      $crate::utils::each_capacity!(@run $name => $expr, $bits);
    )+
  };
  (@run $name:ident => $expr:expr, $bits:expr) => {{
    let $name: $crate::params::Capacity = $crate::params::Capacity::new(1 << $bits);
    $expr
  }};
}

pub(crate) use each_capacity;
