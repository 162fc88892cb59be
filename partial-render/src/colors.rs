//! Colored log fragments, only when stderr is a terminal.
use crate::config::get_config;
use colored::Colorize;

pub trait MaybeColorize {
    fn green(&self) -> String;
    fn red(&self) -> String;
    fn purple(&self) -> String;
    fn yellow(&self) -> String;
}

macro_rules! maybe_color {
    ($name:ident) => {
        fn $name(&self) -> String {
            if get_config().tty {
                Colorize::$name(*self).to_string()
            } else {
                self.to_string()
            }
        }
    };
}

impl MaybeColorize for &str {
    maybe_color!(green);
    maybe_color!(red);
    maybe_color!(purple);
    maybe_color!(yellow);
}

impl MaybeColorize for String {
    fn green(&self) -> String {
        MaybeColorize::green(&self.as_str())
    }

    fn red(&self) -> String {
        MaybeColorize::red(&self.as_str())
    }

    fn purple(&self) -> String {
        MaybeColorize::purple(&self.as_str())
    }

    fn yellow(&self) -> String {
        MaybeColorize::yellow(&self.as_str())
    }
}
