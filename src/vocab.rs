pub const OTHER: &str = "other";

pub const SYNTHETIC_USERS: u32 = 20;

macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn bucket(label: &str) -> &'static str {
                Self::from_label(label).map_or(OTHER, Self::as_str)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary!(
    Action {
        Click => "click",
        Scroll => "scroll",
        Hover => "hover",
        Submit => "submit",
        Search => "search",
        Navigate => "navigate",
    }
);

vocabulary!(
    Page {
        Home => "Home",
        Products => "Products",
        About => "About",
        Contact => "Contact",
        Dashboard => "Dashboard",
        Profile => "Profile",
    }
);

vocabulary!(
    Device {
        Desktop => "desktop",
        Mobile => "mobile",
    }
);

vocabulary!(
    Browser {
        Chrome => "Chrome",
        Firefox => "Firefox",
        Safari => "Safari",
        Edge => "Edge",
    }
);

pub fn synthetic_user(index: u32) -> String {
    format!("user_{index}")
}
