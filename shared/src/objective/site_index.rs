use log::info;

use super::bomb_site::BombSite;

/// Gives every site without an index its rank in name order. Sites that
/// already hold an index keep it, so running this twice changes nothing.
/// Returns how many sites were assigned.
pub fn assign_site_indices(sites: &mut [BombSite]) -> usize {
    let mut order: Vec<usize> = (0..sites.len()).collect();
    order.sort_by(|a, b| sites[*a].name().cmp(sites[*b].name()));

    let mut assigned = 0;
    for (rank, site_position) in order.into_iter().enumerate() {
        let site = &mut sites[site_position];
        if site.assign_index(rank as i32) {
            info!("BombSite {}: assigned index {}", site.name(), rank);
            assigned += 1;
        }
    }
    assigned
}
