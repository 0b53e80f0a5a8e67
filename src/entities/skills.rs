#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Skill {
    Attack,
    Defence,
    Strength,
    Hitpoints,
    Ranged,
    Prayer,
    Magic,
    Cooking,
    Woodcutting,
    Fletching,
    Fishing,
    Firemaking,
    Crafting,
    Smithing,
    Mining,
    Herblore,
    Agility,
    Thieving,
    Slayer,
    Farming,
    Runecrafting,
}

pub const SKILLS: [Skill; 21] = [
    Skill::Attack,
    Skill::Defence,
    Skill::Strength,
    Skill::Hitpoints,
    Skill::Ranged,
    Skill::Prayer,
    Skill::Magic,
    Skill::Cooking,
    Skill::Woodcutting,
    Skill::Fletching,
    Skill::Fishing,
    Skill::Firemaking,
    Skill::Crafting,
    Skill::Smithing,
    Skill::Mining,
    Skill::Herblore,
    Skill::Agility,
    Skill::Thieving,
    Skill::Slayer,
    Skill::Farming,
    Skill::Runecrafting,
];

impl Skill {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Skill::Attack => "attack",
            Skill::Defence => "defence",
            Skill::Strength => "strength",
            Skill::Hitpoints => "hitpoints",
            Skill::Ranged => "ranged",
            Skill::Prayer => "prayer",
            Skill::Magic => "magic",
            Skill::Cooking => "cooking",
            Skill::Woodcutting => "woodcutting",
            Skill::Fletching => "fletching",
            Skill::Fishing => "fishing",
            Skill::Firemaking => "firemaking",
            Skill::Crafting => "crafting",
            Skill::Smithing => "smithing",
            Skill::Mining => "mining",
            Skill::Herblore => "herblore",
            Skill::Agility => "agility",
            Skill::Thieving => "thieving",
            Skill::Slayer => "slayer",
            Skill::Farming => "farming",
            Skill::Runecrafting => "runecrafting",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        SKILLS.iter().copied().find(|skill| skill.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillLevel {
    pub level: u8,
    pub experience: u32,
}

impl Default for SkillLevel {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skills {
    levels: [SkillLevel; SKILLS.len()],
}

impl Default for Skills {
    fn default() -> Self {
        let mut levels = [SkillLevel::default(); SKILLS.len()];
        levels[Skill::Hitpoints.index()] = SkillLevel {
            level: 10,
            experience: 1154,
        };
        Self { levels }
    }
}

impl Skills {
    pub fn get(&self, skill: Skill) -> SkillLevel {
        self.levels[skill.index()]
    }

    pub fn level(&self, skill: Skill) -> u8 {
        self.get(skill).level
    }

    pub fn set_level(&mut self, skill: Skill, level: u8) {
        self.levels[skill.index()].level = level;
    }
}
