use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{Cell, Food, Hazard, ObjectKind, Vector2};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Unit box centred on a grid cell
    pub fn from_cell(cell: Vector2) -> Self {
        Self::from_center_size(cell.as_vec2(), Vec2::ONE)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn contains_cell(&self, cell: Vector2) -> bool {
        self.contains(cell.as_vec2())
    }
}

/// Collision bounds component
#[derive(Debug, Clone, Copy)]
pub struct Collider(pub Aabb);

/// An object the collision detector can test the snake head against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaObject {
    pub entity: Entity,
    pub bounds: Aabb,
}

/// Food and hazard entities for one round
pub struct Arena {
    pub world: World,
    food: Option<Entity>,
}

impl Arena {
    pub fn new(hazards: &[Vector2]) -> Self {
        let mut world = World::new();
        for &cell in hazards {
            world.spawn((Cell(cell), Collider(Aabb::from_cell(cell)), Hazard));
        }
        Self { world, food: None }
    }

    /// Place the food, replacing any existing food entity
    pub fn place_food(&mut self, cell: Vector2) -> Entity {
        if let Some(old) = self.food.take() {
            let _ = self.world.despawn(old);
        }
        let entity = self
            .world
            .spawn((Cell(cell), Collider(Aabb::from_cell(cell)), Food));
        self.food = Some(entity);
        entity
    }

    pub fn food_cell(&self) -> Option<Vector2> {
        let entity = self.food?;
        self.world.get::<&Cell>(entity).ok().map(|cell| cell.0)
    }

    pub fn hazard_cells(&self) -> Vec<Vector2> {
        let mut cells: Vec<(Entity, Vector2)> = self
            .world
            .query::<(&Cell, &Hazard)>()
            .iter()
            .map(|(e, (cell, _))| (e, cell.0))
            .collect();
        cells.sort_by_key(|(e, _)| e.id());
        cells.into_iter().map(|(_, cell)| cell).collect()
    }

    /// All collidable objects, ordered by entity id for determinism
    pub fn objects(&self) -> Vec<ArenaObject> {
        let mut objects: Vec<ArenaObject> = self
            .world
            .query::<&Collider>()
            .iter()
            .map(|(entity, collider)| ArenaObject {
                entity,
                bounds: collider.0,
            })
            .collect();
        objects.sort_by_key(|o| o.entity.id());
        objects
    }

    pub fn kind_of(&self, entity: Entity) -> Option<ObjectKind> {
        if self.world.get::<&Food>(entity).is_ok() {
            Some(ObjectKind::Food)
        } else if self.world.get::<&Hazard>(entity).is_ok() {
            Some(ObjectKind::Hazard)
        } else {
            None
        }
    }
}
