//! Builds a small hiking network and walks it with a simple personality.
use switchback::{
    Mountain, MountainManager, PersonalityDecision, Trail, WalkerPersonality,
};

/// Always takes the top branch.
struct TopWalker {
    visited: Vec<Mountain>,
}

impl WalkerPersonality for TopWalker {
    fn select_branch(&mut self, _top: &Trail, _bottom: &Trail) -> PersonalityDecision {
        PersonalityDecision::Top
    }

    fn add_mountain(&mut self, mountain: &Mountain) {
        self.visited.push(mountain.clone());
    }
}

fn main() {
    // start -> split(ridge / valley) -> summit
    let trail = Trail::series(
        Mountain::new("start", 3),
        Trail::split(
            Trail::series(Mountain::new("ridge", 5), Trail::new()),
            Trail::series(Mountain::new("valley", 1), Trail::new()),
            Trail::series(Mountain::new("summit", 4), Trail::new()),
        ),
    );

    // Walk the trail along the top branch.
    let mut walker = TopWalker { visited: Vec::new() };
    trail.follow_path(&mut walker);
    println!("walked past:");
    for mountain in &walker.visited {
        println!("  {} (difficulty {})", mountain.name, mountain.difficulty_level);
    }

    // Enumerate every path a cautious hiker could take.
    let paths = trail.difficulty_maximum_paths(5);
    println!("paths below difficulty 5: {}", paths.len());

    // Edits are pure: the original trail is unchanged.
    let extended = trail.add_mountain_before(Mountain::new("carpark", 1));
    assert_eq!(trail.collect_all_mountains().len(), 4);
    assert_eq!(extended.collect_all_mountains().len(), 5);

    // Group the network's mountains by difficulty.
    let mut manager = MountainManager::new();
    for mountain in trail.collect_all_mountains() {
        manager.add_mountain(mountain);
    }
    for group in manager.group_by_difficulty() {
        let names: Vec<&str> = group.iter().map(|m| m.name.as_str()).collect();
        println!("difficulty {}: {:?}", group[0].difficulty_level, names);
    }
}
