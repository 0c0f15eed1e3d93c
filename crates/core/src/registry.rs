//! Name -> factory lookup for effects.
//!
//! Each entry owns a plain `fn` factory that parses the effect's own string
//! arguments into a typed configuration, so callers never match on effect
//! names themselves.

use thiserror::Error;

use crate::effect::Effect;
use crate::effects::{
    fire, fountain, life, lorenz, pendulum, plasma, starfield, tunnel, wave, ConwayLife,
    DoublePendulum, FireSimulation, LorenzAttractor, ParametricWave, ParticleFountain, Plasma,
    StarfieldProjection, TunnelMarch,
};
use crate::types::{Color, FireScheme};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown effect '{0}' (try --list)")]
    UnknownEffect(String),
    #[error("{effect}: invalid argument '{arg}': {reason}")]
    InvalidArgument {
        effect: &'static str,
        arg: String,
        reason: &'static str,
    },
}

pub type EffectFactory = fn(&[String]) -> Result<Box<dyn Effect>, RegistryError>;

#[derive(Clone, Copy)]
pub struct EffectEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    /// Argument synopsis shown by `--list`; empty when the effect takes none.
    pub usage: &'static str,
    pub factory: EffectFactory,
}

impl std::fmt::Debug for EffectEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectEntry")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

impl EffectEntry {
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Default)]
pub struct EffectRegistry {
    entries: Vec<EffectEntry>,
}

impl EffectRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in effect.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(EffectEntry {
            name: "life",
            aliases: &["lifegame"],
            description: life::LIFE_DESCRIPTION,
            usage: "[density 0..1]",
            factory: make_life,
        });
        registry.register(EffectEntry {
            name: "lorenz",
            aliases: &[],
            description: lorenz::LORENZ_DESCRIPTION,
            usage: "",
            factory: make_lorenz,
        });
        registry.register(EffectEntry {
            name: "fountain",
            aliases: &[],
            description: fountain::FOUNTAIN_DESCRIPTION,
            usage: "",
            factory: make_fountain,
        });
        registry.register(EffectEntry {
            name: "tunnel",
            aliases: &[],
            description: tunnel::TUNNEL_DESCRIPTION,
            usage: "[frames | loop]",
            factory: make_tunnel,
        });
        registry.register(EffectEntry {
            name: "fire",
            aliases: &[],
            description: fire::FIRE_DESCRIPTION,
            usage: "[red | blue | green] [background]",
            factory: make_fire,
        });
        registry.register(EffectEntry {
            name: "starfield",
            aliases: &["stars"],
            description: starfield::STARFIELD_DESCRIPTION,
            usage: "[speed]",
            factory: make_starfield,
        });
        registry.register(EffectEntry {
            name: "plasma",
            aliases: &[],
            description: plasma::PLASMA_DESCRIPTION,
            usage: "",
            factory: make_plasma,
        });
        registry.register(EffectEntry {
            name: "wave",
            aliases: &[],
            description: wave::WAVE_DESCRIPTION,
            usage: "[colour [background]]",
            factory: make_wave,
        });
        registry.register(EffectEntry {
            name: "pendulum",
            aliases: &["doublependulum"],
            description: pendulum::PENDULUM_DESCRIPTION,
            usage: "",
            factory: make_pendulum,
        });
        registry
    }

    /// Add an entry. A later entry with a clashing name shadows nothing: the
    /// first match wins on lookup.
    pub fn register(&mut self, entry: EffectEntry) {
        self.entries.push(entry);
    }

    /// Case-insensitive lookup by name or alias.
    pub fn lookup(&self, name: &str) -> Option<&EffectEntry> {
        self.entries.iter().find(|e| e.matches(name))
    }

    pub fn create(&self, name: &str, args: &[String]) -> Result<Box<dyn Effect>, RegistryError> {
        let entry = self
            .lookup(name)
            .ok_or_else(|| RegistryError::UnknownEffect(name.to_string()))?;
        (entry.factory)(args)
    }

    /// `(name, description)` for every entry, in registration order.
    pub fn list(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().map(|e| (e.name, e.description))
    }

    pub fn entries(&self) -> &[EffectEntry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }
}

/// Accept at most one argument.
fn single_arg<'a>(
    effect: &'static str,
    args: &'a [String],
) -> Result<Option<&'a str>, RegistryError> {
    match args {
        [] => Ok(None),
        [one] => Ok(Some(one.as_str())),
        [_, extra, ..] => Err(RegistryError::InvalidArgument {
            effect,
            arg: extra.clone(),
            reason: "too many arguments",
        }),
    }
}

fn no_args(effect: &'static str, args: &[String]) -> Result<(), RegistryError> {
    match args.first() {
        None => Ok(()),
        Some(arg) => Err(RegistryError::InvalidArgument {
            effect,
            arg: arg.clone(),
            reason: "this effect takes no arguments",
        }),
    }
}

fn make_life(args: &[String]) -> Result<Box<dyn Effect>, RegistryError> {
    let density = match single_arg("life", args)? {
        None => life::LIFE_DENSITY,
        Some(arg) => match arg.parse::<f64>() {
            Ok(d) if (0.0..=1.0).contains(&d) => d,
            _ => {
                return Err(RegistryError::InvalidArgument {
                    effect: "life",
                    arg: arg.to_string(),
                    reason: "density must be a number between 0 and 1",
                })
            }
        },
    };
    Ok(Box::new(ConwayLife::with_density(density)))
}

fn make_lorenz(args: &[String]) -> Result<Box<dyn Effect>, RegistryError> {
    no_args("lorenz", args)?;
    Ok(Box::new(LorenzAttractor::new()))
}

fn make_fountain(args: &[String]) -> Result<Box<dyn Effect>, RegistryError> {
    no_args("fountain", args)?;
    Ok(Box::new(ParticleFountain::new()))
}

fn make_tunnel(args: &[String]) -> Result<Box<dyn Effect>, RegistryError> {
    let tunnel = match single_arg("tunnel", args)? {
        None => TunnelMarch::new(),
        Some(arg) if arg.eq_ignore_ascii_case("loop") => TunnelMarch::endless(),
        Some(arg) => match arg.parse::<u64>() {
            Ok(frames) if frames > 0 => TunnelMarch::with_frame_limit(Some(frames)),
            _ => {
                return Err(RegistryError::InvalidArgument {
                    effect: "tunnel",
                    arg: arg.to_string(),
                    reason: "expected a positive frame count or 'loop'",
                })
            }
        },
    };
    Ok(Box::new(tunnel))
}

fn make_fire(args: &[String]) -> Result<Box<dyn Effect>, RegistryError> {
    let (scheme, background) = match args {
        [] => (None, None),
        [scheme] => (Some(scheme), None),
        [scheme, bg] => (Some(scheme), Some(bg)),
        [_, _, extra, ..] => {
            return Err(RegistryError::InvalidArgument {
                effect: "fire",
                arg: extra.clone(),
                reason: "too many arguments",
            })
        }
    };
    let scheme = match scheme {
        None => FireScheme::default(),
        Some(arg) => FireScheme::from_str(arg).ok_or_else(|| RegistryError::InvalidArgument {
            effect: "fire",
            arg: arg.to_string(),
            reason: "expected red, blue or green",
        })?,
    };
    let mut fire = FireSimulation::new(scheme);
    if let Some(bg) = background {
        fire = fire.with_background(parse_color("fire", bg)?);
    }
    Ok(Box::new(fire))
}

fn make_starfield(args: &[String]) -> Result<Box<dyn Effect>, RegistryError> {
    let field = match single_arg("starfield", args)? {
        None => StarfieldProjection::new(),
        Some(arg) => match arg.parse::<f64>() {
            Ok(speed) if speed > 0.0 && speed.is_finite() => StarfieldProjection::with_speed(speed),
            _ => {
                return Err(RegistryError::InvalidArgument {
                    effect: "starfield",
                    arg: arg.to_string(),
                    reason: "speed must be a positive number",
                })
            }
        },
    };
    Ok(Box::new(field))
}

fn make_plasma(args: &[String]) -> Result<Box<dyn Effect>, RegistryError> {
    no_args("plasma", args)?;
    Ok(Box::new(Plasma::new()))
}

fn parse_color(effect: &'static str, arg: &str) -> Result<Color, RegistryError> {
    Color::from_str(arg).ok_or_else(|| RegistryError::InvalidArgument {
        effect,
        arg: arg.to_string(),
        reason: "unknown colour name",
    })
}

fn make_wave(args: &[String]) -> Result<Box<dyn Effect>, RegistryError> {
    let wave = match args {
        [] => ParametricWave::default(),
        [fg] => ParametricWave::new(parse_color("wave", fg)?),
        [fg, bg] => ParametricWave::new(parse_color("wave", fg)?)
            .with_background(parse_color("wave", bg)?),
        [_, _, extra, ..] => {
            return Err(RegistryError::InvalidArgument {
                effect: "wave",
                arg: extra.clone(),
                reason: "too many arguments",
            })
        }
    };
    Ok(Box::new(wave))
}

fn make_pendulum(args: &[String]) -> Result<Box<dyn Effect>, RegistryError> {
    no_args("pendulum", args)?;
    Ok(Box::new(DoublePendulum::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_knows_aliases() {
        let registry = EffectRegistry::builtin();
        assert_eq!(registry.lookup("LIFE").map(|e| e.name), Some("life"));
        assert_eq!(registry.lookup("LifeGame").map(|e| e.name), Some("life"));
        assert_eq!(registry.lookup("stars").map(|e| e.name), Some("starfield"));
        assert!(registry.lookup("snake").is_none());
    }

    #[test]
    fn test_created_effect_reports_canonical_name() {
        let registry = EffectRegistry::builtin();
        for name in registry.names() {
            let effect = registry.create(name, &[]).unwrap();
            assert_eq!(effect.name(), name);
        }
    }

    #[test]
    fn test_fire_scheme_argument_selects_interval() {
        let registry = EffectRegistry::builtin();
        let blue = registry.create("fire", &args(&["blue"])).unwrap();
        assert_eq!(blue.default_interval_ms(), 40);
        let err = registry.create("fire", &args(&["purple"])).err();
        assert!(matches!(
            err,
            Some(RegistryError::InvalidArgument { effect: "fire", .. })
        ));
        let dark = registry.create("fire", &args(&["green", "darkred"])).unwrap();
        assert_eq!(dark.background(), Color::DarkRed);
        assert!(registry.create("fire", &args(&["red", "nope"])).is_err());
    }

    #[test]
    fn test_unknown_effect_error() {
        let registry = EffectRegistry::builtin();
        let err = registry.create("matrix", &[]).err();
        assert_eq!(err, Some(RegistryError::UnknownEffect("matrix".to_string())));
    }

    #[test]
    fn test_effects_without_arguments_reject_them() {
        let registry = EffectRegistry::builtin();
        assert!(registry.create("lorenz", &args(&["fast"])).is_err());
        assert!(registry.create("life", &args(&["0.3", "extra"])).is_err());
        assert!(registry.create("life", &args(&["2"])).is_err());
        assert!(registry.create("tunnel", &args(&["loop"])).is_ok());
        assert!(registry.create("tunnel", &args(&["0"])).is_err());
        assert!(registry.create("wave", &args(&["red", "blue", "green"])).is_err());
    }
}
