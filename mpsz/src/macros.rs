/// Used for making const tile IDs in u8.
///
/// Red fives are written `0m`, `0p` and `0s`, as in MPSZ notation.
///
/// ```
/// use mpsz::tu8;
///
/// assert_eq!(tu8!(1z), 27u8);
/// assert_eq!(tu8!(0p), 35u8);
/// ```
#[macro_export]
macro_rules! tu8 {
    (1m) => {
        0_u8
    };
    (2m) => {
        1_u8
    };
    (3m) => {
        2_u8
    };
    (4m) => {
        3_u8
    };
    (5m) => {
        4_u8
    };
    (6m) => {
        5_u8
    };
    (7m) => {
        6_u8
    };
    (8m) => {
        7_u8
    };
    (9m) => {
        8_u8
    };

    (1p) => {
        9_u8
    };
    (2p) => {
        10_u8
    };
    (3p) => {
        11_u8
    };
    (4p) => {
        12_u8
    };
    (5p) => {
        13_u8
    };
    (6p) => {
        14_u8
    };
    (7p) => {
        15_u8
    };
    (8p) => {
        16_u8
    };
    (9p) => {
        17_u8
    };

    (1s) => {
        18_u8
    };
    (2s) => {
        19_u8
    };
    (3s) => {
        20_u8
    };
    (4s) => {
        21_u8
    };
    (5s) => {
        22_u8
    };
    (6s) => {
        23_u8
    };
    (7s) => {
        24_u8
    };
    (8s) => {
        25_u8
    };
    (9s) => {
        26_u8
    };

    (1z) => {
        27_u8
    };
    (2z) => {
        28_u8
    };
    (3z) => {
        29_u8
    };
    (4z) => {
        30_u8
    };
    (5z) => {
        31_u8
    };
    (6z) => {
        32_u8
    };
    (7z) => {
        33_u8
    };

    (0m) => {
        34_u8
    };
    (0p) => {
        35_u8
    };
    (0s) => {
        36_u8
    };

    ($first:tt, $($left:tt),*) => {
        [$crate::tu8!($first), $($crate::tu8!($left)),*]
    };

    ($($_:tt)*) => {
        ::std::compile_error!("invalid tile pattern");
    }
}

/// Used for making const tile IDs in usize.
#[macro_export]
macro_rules! tuz {
    ($s:tt) => {
        $crate::tu8!($s) as usize
    };
    ($first:tt, $($left:tt),*) => {
        [$crate::tuz!($first), $($crate::tuz!($left)),*]
    };
}

/// Used for making const tiles.
#[macro_export]
macro_rules! t {
    ($s:tt) => {
        // SAFETY: All possible values of `tu8!` are valid for `Tile`.
        unsafe { $crate::Tile::new_unchecked($crate::tu8!($s)) }
    };
    ($first:tt, $($left:tt),*) => {
        [$crate::t!($first), $($crate::t!($left)),*]
    };
}

/// A handy macro for matching a `u8` against const tile IDs.
#[macro_export]
macro_rules! matches_tu8 {
    ($o:expr, $($s:tt)|* $(|)?) => {
        matches!($o, $($crate::tu8!($s))|*)
    };
}

/// Used for making non-const tiles.
///
/// # Panics
/// Panics if the input is not a valid tile.
#[macro_export]
macro_rules! must_tile {
    ($($id:tt)*) => {
        $crate::Tile::try_from($($id)*).unwrap()
    };
}

#[cfg(doctest)]
/// ```rust,compile_fail
/// use mpsz::tu8;
///
/// let t = tu8!(5mr);
/// ```
struct _CompileFail;
