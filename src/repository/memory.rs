//! In-memory store for development and testing

use std::collections::BTreeSet;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::ScheduleStore;
use crate::{
    error::AppResult,
    models::{
        classroom::{Classroom, ClassroomFilter},
        equipment::{
            ClassroomEquipment, ClassroomSoftware, EquipmentType, GroupProfile,
            ProfileSoftwareRequirement, Software, SoftwareRequirement, StudentGroup,
        },
        reservation::{Reservation, ReservationQuery},
        schedule::{Semester, TimeSlot},
    },
};

/// [`ScheduleStore`] backed by concurrent maps
#[derive(Default)]
pub struct MemoryStore {
    semesters: DashMap<Uuid, Semester>,
    time_slots: DashMap<Uuid, TimeSlot>,
    classrooms: DashMap<Uuid, Classroom>,
    reservations: DashMap<(Uuid, Uuid), Reservation>,
    equipment_types: DashMap<Uuid, EquipmentType>,
    software: DashMap<Uuid, Software>,
    classroom_equipment: DashMap<Uuid, BTreeSet<Uuid>>,
    classroom_software: DashMap<Uuid, BTreeSet<Uuid>>,
    subject_software: DashMap<Uuid, Vec<(Uuid, bool)>>,
    student_groups: DashMap<Uuid, StudentGroup>,
    profiles: DashMap<Uuid, GroupProfile>,
    profile_members: DashMap<Uuid, BTreeSet<Uuid>>,
    profile_software: DashMap<Uuid, Vec<(Uuid, bool)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_semester(&self, semester: Semester) {
        self.semesters.insert(semester.id, semester);
    }

    pub fn add_time_slot(&self, slot: TimeSlot) {
        self.time_slots.insert(slot.id, slot);
    }

    pub fn add_classroom(&self, classroom: Classroom) {
        self.classrooms.insert(classroom.id, classroom);
    }

    /// Insert or replace the reservation of one assignment in one classroom
    pub fn add_reservation(&self, reservation: Reservation) {
        self.reservations
            .insert((reservation.assignment_id, reservation.classroom_id), reservation);
    }

    pub fn add_equipment_type(&self, equipment: EquipmentType) {
        self.equipment_types.insert(equipment.id, equipment);
    }

    pub fn add_software(&self, software: Software) {
        self.software.insert(software.id, software);
    }

    pub fn install_equipment(&self, classroom_id: Uuid, equipment_type_id: Uuid) {
        self.classroom_equipment
            .entry(classroom_id)
            .or_default()
            .insert(equipment_type_id);
    }

    pub fn install_software(&self, classroom_id: Uuid, software_id: Uuid) {
        self.classroom_software
            .entry(classroom_id)
            .or_default()
            .insert(software_id);
    }

    pub fn require_software(&self, subject_id: Uuid, software_id: Uuid, is_required: bool) {
        self.subject_software
            .entry(subject_id)
            .or_default()
            .push((software_id, is_required));
    }

    pub fn add_student_group(&self, group: StudentGroup) {
        self.student_groups.insert(group.id, group);
    }

    pub fn add_group_profile(&self, profile: GroupProfile) {
        self.profiles.insert(profile.id, profile);
    }

    pub fn add_profile_member(&self, profile_id: Uuid, student_group_id: Uuid) {
        self.profile_members
            .entry(profile_id)
            .or_default()
            .insert(student_group_id);
    }

    pub fn require_profile_software(&self, profile_id: Uuid, software_id: Uuid, is_required: bool) {
        self.profile_software
            .entry(profile_id)
            .or_default()
            .push((software_id, is_required));
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn semester(&self, id: Uuid) -> AppResult<Option<Semester>> {
        Ok(self.semesters.get(&id).map(|s| s.clone()))
    }

    async fn time_slot(&self, id: Uuid) -> AppResult<Option<TimeSlot>> {
        Ok(self.time_slots.get(&id).map(|s| s.clone()))
    }

    async fn classroom(&self, id: Uuid) -> AppResult<Option<Classroom>> {
        Ok(self.classrooms.get(&id).map(|c| c.clone()))
    }

    async fn classrooms(&self, filter: &ClassroomFilter) -> AppResult<Vec<Classroom>> {
        let mut rows: Vec<Classroom> = self
            .classrooms
            .iter()
            .filter(|c| filter.matches(c.value()))
            .map(|c| c.value().clone())
            .collect();
        rows.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(rows)
    }

    async fn classroom_types(&self) -> AppResult<Vec<String>> {
        let types: BTreeSet<String> = self
            .classrooms
            .iter()
            .filter_map(|c| c.classroom_type.clone())
            .collect();
        Ok(types.into_iter().collect())
    }

    async fn reservations(&self, query: &ReservationQuery) -> AppResult<Vec<Reservation>> {
        let mut rows: Vec<Reservation> = self
            .reservations
            .iter()
            .map(|r| r.value().clone())
            .filter(|r| query.classroom_ids.contains(&r.classroom_id))
            .filter(|r| r.semester_id == query.semester_id)
            .filter(|r| query.day_of_week.map_or(true, |d| r.time_slot.day_of_week == d))
            .filter(|r| query.exclude_assignment_id != Some(r.assignment_id))
            .collect();
        rows.sort_by(|a, b| {
            (a.classroom_id, a.time_slot.day_of_week, a.time_slot.start_time)
                .cmp(&(b.classroom_id, b.time_slot.day_of_week, b.time_slot.start_time))
        });
        Ok(rows)
    }

    async fn classroom_equipment(&self, classroom_ids: &[Uuid]) -> AppResult<Vec<ClassroomEquipment>> {
        let mut rows = Vec::new();
        for classroom_id in classroom_ids {
            let Some(installed) = self.classroom_equipment.get(classroom_id) else {
                continue;
            };
            for equipment_id in installed.iter() {
                if let Some(equipment) = self.equipment_types.get(equipment_id) {
                    rows.push(ClassroomEquipment {
                        classroom_id: *classroom_id,
                        equipment: equipment.clone(),
                    });
                }
            }
        }
        rows.sort_by(|a, b| a.equipment.name.cmp(&b.equipment.name));
        Ok(rows)
    }

    async fn classroom_software(&self, classroom_ids: &[Uuid]) -> AppResult<Vec<ClassroomSoftware>> {
        let mut rows = Vec::new();
        for classroom_id in classroom_ids {
            let Some(installed) = self.classroom_software.get(classroom_id) else {
                continue;
            };
            for software_id in installed.iter() {
                if let Some(software) = self.software.get(software_id) {
                    rows.push(ClassroomSoftware {
                        classroom_id: *classroom_id,
                        software: software.clone(),
                    });
                }
            }
        }
        rows.sort_by(|a, b| a.software.name.cmp(&b.software.name));
        Ok(rows)
    }

    async fn equipment_types(&self) -> AppResult<Vec<EquipmentType>> {
        let mut rows: Vec<EquipmentType> = self.equipment_types.iter().map(|e| e.clone()).collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn software_catalog(&self) -> AppResult<Vec<Software>> {
        let mut rows: Vec<Software> = self.software.iter().map(|s| s.clone()).collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn subject_software(&self, subject_id: Uuid) -> AppResult<Vec<SoftwareRequirement>> {
        let Some(requirements) = self.subject_software.get(&subject_id) else {
            return Ok(Vec::new());
        };
        let mut rows: Vec<SoftwareRequirement> = requirements
            .iter()
            .filter_map(|(software_id, is_required)| {
                self.software.get(software_id).map(|s| SoftwareRequirement {
                    software: s.clone(),
                    is_required: *is_required,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            b.is_required
                .cmp(&a.is_required)
                .then_with(|| a.software.name.cmp(&b.software.name))
        });
        Ok(rows)
    }

    async fn student_group(&self, id: Uuid) -> AppResult<Option<StudentGroup>> {
        Ok(self.student_groups.get(&id).map(|g| g.clone()))
    }

    async fn group_profiles(&self, subject_id: Uuid, student_group_id: Uuid) -> AppResult<Vec<GroupProfile>> {
        let mut rows: Vec<GroupProfile> = self
            .profiles
            .iter()
            .filter(|p| p.subject_id == subject_id)
            .filter(|p| {
                self.profile_members
                    .get(&p.id)
                    .map_or(false, |members| members.contains(&student_group_id))
            })
            .map(|p| p.value().clone())
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn profile_software(&self, profile_ids: &[Uuid]) -> AppResult<Vec<ProfileSoftwareRequirement>> {
        let mut rows = Vec::new();
        for profile_id in profile_ids {
            let Some(requirements) = self.profile_software.get(profile_id) else {
                continue;
            };
            for (software_id, is_required) in requirements.iter() {
                if let Some(software) = self.software.get(software_id) {
                    rows.push(ProfileSoftwareRequirement {
                        profile_id: *profile_id,
                        software: software.clone(),
                        is_required: *is_required,
                    });
                }
            }
        }
        rows.sort_by(|a, b| {
            b.is_required
                .cmp(&a.is_required)
                .then_with(|| a.software.name.cmp(&b.software.name))
        });
        Ok(rows)
    }
}
